use crate::RedactedPassword;

/// **VALUE**: Verifies that a password never appears in Debug or Display output.
///
/// **WHY THIS MATTERS**: Credentials are logged at info level by username. A derived
/// Debug on the password would leak it into the console and the log file.
///
/// **BUG THIS CATCHES**: Would catch someone replacing the manual impls with `#[derive(Debug)]`.
#[test]
fn given_password_when_formatted_then_value_is_hidden() {
    // GIVEN: A password
    let password = RedactedPassword::new("hunter2");

    // WHEN: Formatting both ways
    let debug = format!("{password:?}");
    let display = password.to_string();

    // THEN: Neither should contain the secret
    assert!(!debug.contains("hunter2"));
    assert!(!display.contains("hunter2"));
    assert_eq!(display, RedactedPassword::new("a much longer passphrase").to_string());
    assert_eq!(password.as_str(), "hunter2");
    assert_eq!(password.len(), 7);
}

/// **VALUE**: Verifies that implicit serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch a derived `Serialize`, which would let the password
/// slip into any JSON the client writes (config files, logs) without an explicit opt-in.
#[test]
fn given_password_when_serialized_directly_then_fails() {
    let password = RedactedPassword::new("hunter2");

    let result = serde_json::to_string(&password);

    assert!(result.is_err(), "Direct serialization must be refused");
    let message = result.unwrap_err().to_string();
    assert!(message.contains("as_str()"), "Error should explain the opt-in: {message}");
    assert!(message.contains("RedactedPassword"));
}

#[test]
fn given_empty_password_when_checked_then_reports_empty() {
    assert!(RedactedPassword::new("").is_empty());
}
