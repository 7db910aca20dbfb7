// Unit tests for logger module initialization logic
// Tests focus on idempotency and error handling

use crate::logger::{LOG_FILE_NAME, initialize, level_for, open_log_file};

use std::path::PathBuf;

use log::LevelFilter;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: fern refuses to install a second global logger. If the guard
/// is lost, a repeated call would error out during startup.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A writable temporary directory
    let temp_dir = tempfile::tempdir().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path(), LevelFilter::Debug);
    let result2 = initialize(temp_dir.path(), LevelFilter::Debug);

    // THEN: Both return Ok
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: Verifies that an unusable log directory is reported as an error.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` or the directory creation
/// unwraps instead of returning a Result.
#[test]
fn given_invalid_log_dir_when_opening_log_file_then_returns_error() {
    // GIVEN: A path below a file, which can never be a directory
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Opening the log file
    let result = open_log_file(&invalid_dir);

    // THEN: A Console error, not a panic
    let err = result.unwrap_err();
    let err_string = format!("{:?}", err);
    assert!(
        err_string.contains("Console"),
        "Error should be ConsoleError::Console variant"
    );
}

#[test]
fn given_missing_log_dir_when_opening_log_file_then_directory_created() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_dir = temp_dir.path().join("nested").join("logs");

    let result = open_log_file(&log_dir);

    assert!(result.is_ok());
    assert!(log_dir.join(LOG_FILE_NAME).exists());
}

#[test]
fn given_verbose_flag_when_choosing_level_then_debug() {
    assert_eq!(level_for(true), LevelFilter::Debug);
    assert!(level_for(false) < LevelFilter::Debug);
}
