// Unit tests for error module
// Tests display formatting and conversions from client-core errors

use crate::error::ConsoleError;

use client_core::error::config::ConfigError;
use client_core::scan_client::ScanClient;

use common::ErrorLocation;
use models::Credentials;

use std::panic::Location;

/// **VALUE**: Verifies the user-facing message carries no location suffix while the
/// Display form does.
///
/// **WHY THIS MATTERS**: The console prints `message()` to the user and logs the full
/// Display form. Mixing them up either hides the source location from logs or leaks
/// file paths into the session output.
#[test]
fn given_console_error_when_formatted_then_location_only_in_display() {
    // GIVEN: A ConsoleError
    let err = ConsoleError::Console {
        message: String::from("Test"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Formatting both ways
    let display = err.to_string();

    // THEN: Display has the variant tag and location, message() is bare
    assert!(display.starts_with("Console Error: Test"));
    assert!(display.contains(file!()), "Display was: {display}");
    assert_eq!(err.message(), "Test");
}

#[test]
fn given_config_error_when_converted_then_core_variant() {
    let config_error = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("bad version"),
    };

    let err = ConsoleError::from(config_error);

    assert!(matches!(err, ConsoleError::Core { .. }));
    assert!(err.message().contains("bad version"));
}

#[test]
fn given_invalid_url_when_client_built_then_core_error() {
    let err: ConsoleError = ScanClient::new("not a url").map(|_| ()).unwrap_err().into();

    assert!(matches!(err, ConsoleError::Core { .. }));
}

/// **BUG THIS CATCHES**: Would catch validation failures being reported as internal
/// errors instead of input mistakes the user can correct.
#[test]
fn given_empty_password_when_converted_then_input_variant() {
    let model_error = Credentials::builder()
        .with_username("doctor")
        .with_password("")
        .build()
        .unwrap_err();

    let err = ConsoleError::from(model_error);

    assert!(matches!(err, ConsoleError::Input { .. }));
    assert!(err.message().contains("Password"));
}
