use crate::command::Command;
use crate::error::ConsoleError;

use std::path::PathBuf;

/// **VALUE**: Verifies login input becomes credentials with extra fields passed through.
///
/// **BUG THIS CATCHES**: Would catch extra `field=value` pairs being dropped, or a
/// `password=` pair not replacing the positional password.
#[test]
fn given_login_with_extra_fields_when_parsed_then_credentials_built() {
    // GIVEN/WHEN: A login line with one extra field
    let command: Command = "login doctor s3cret remember=on".parse().unwrap();

    // THEN: Username, password and the extra field are routed
    let Command::Login(credentials) = command else {
        panic!("Expected a login command");
    };
    assert_eq!(credentials.username(), "doctor");
    assert_eq!(credentials.password().as_str(), "s3cret");
    assert_eq!(
        credentials.extra_fields().get("remember").map(String::as_str),
        Some("on")
    );
}

/// **VALUE**: Verifies a parsed login never prints its password.
///
/// **WHY THIS MATTERS**: Rejected or traced commands are logged with `{:?}`.
#[test]
fn given_login_command_when_debug_formatted_then_password_hidden() {
    let command: Command = "login doctor s3cret".parse().unwrap();

    let debug = format!("{command:?}");

    assert!(!debug.contains("s3cret"), "Debug output leaked: {debug}");
    assert!(debug.contains("doctor"));
}

#[test]
fn given_login_missing_password_when_parsed_then_usage_error() {
    let result = "login doctor".parse::<Command>();

    assert!(matches!(result, Err(ConsoleError::Input { .. })));
}

#[test]
fn given_malformed_extra_field_when_parsed_then_input_error() {
    let err = "login doctor s3cret remember".parse::<Command>().unwrap_err();

    assert!(err.message().contains("field=value"));
}

#[test]
fn given_select_with_files_when_parsed_then_all_paths_kept() {
    let command: Command = "select a.png b.jpg".parse().unwrap();

    let Command::Select(paths) = command else {
        panic!("Expected a select command");
    };
    assert_eq!(paths, [PathBuf::from("a.png"), PathBuf::from("b.jpg")]);
}

#[test]
fn given_select_without_files_when_parsed_then_empty_selection() {
    let command: Command = "select".parse().unwrap();

    assert!(matches!(command, Command::Select(paths) if paths.is_empty()));
}

#[test]
fn given_delete_with_id_when_parsed_then_id_read() {
    assert!(matches!("delete 42".parse::<Command>(), Ok(Command::Delete(42))));
    assert!("delete forty-two".parse::<Command>().is_err());
    assert!("delete".parse::<Command>().is_err());
}

#[test]
fn given_simple_commands_when_parsed_then_recognized_case_insensitively() {
    assert!(matches!("ANALYZE".parse::<Command>(), Ok(Command::Analyze)));
    assert!(matches!("history".parse::<Command>(), Ok(Command::History)));
    assert!(matches!("page".parse::<Command>(), Ok(Command::Page)));
    assert!(matches!("?".parse::<Command>(), Ok(Command::Help)));
    assert!(matches!("exit".parse::<Command>(), Ok(Command::Quit)));
    assert!(matches!("open /history".parse::<Command>(), Ok(Command::Open(path)) if path == "/history"));
}

#[test]
fn given_unknown_or_extra_words_when_parsed_then_input_error() {
    assert!("scan now".parse::<Command>().is_err());
    assert!("analyze now".parse::<Command>().is_err());
    assert!("   ".parse::<Command>().is_err());
}

#[test]
fn given_signup_line_when_parsed_then_form_built() {
    let command: Command = "signup alice s3cret 34".parse().unwrap();

    let Command::Signup(form) = command else {
        panic!("Expected a signup command");
    };
    assert_eq!(form.username(), "alice");
    assert_eq!(form.age(), 34);
}

#[test]
fn given_signup_with_bad_age_when_parsed_then_input_error() {
    let err = "signup alice s3cret old".parse::<Command>().unwrap_err();

    assert!(matches!(err, ConsoleError::Input { .. }));
    assert!(err.message().contains("Age"));
    assert!("signup alice s3cret".parse::<Command>().is_err());
}

#[test]
fn given_logout_when_parsed_then_recognized() {
    assert!(matches!("logout".parse::<Command>(), Ok(Command::Logout)));
    assert!("logout now".parse::<Command>().is_err());
}
