use crate::ErrorLocation;

use std::panic::Location;

#[track_caller]
fn capture_location() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

/// **VALUE**: Verifies that a `#[track_caller]` helper records the line of its call site.
///
/// **WHY THIS MATTERS**: Every client, config, and model error carries an `ErrorLocation`.
/// If the captured position drifts to the constructor, error messages stop pointing at
/// the request or parse step that failed.
///
/// **BUG THIS CATCHES**: Would catch if `ErrorLocation::from()` stopped copying the
/// caller's file, line, or column.
#[test]
fn given_track_caller_helper_when_location_captured_then_points_at_call_site() {
    // GIVEN/WHEN: Capturing on a known line
    let (location, expected_line) = (capture_location(), line!());

    // THEN: File and line should match this call site
    assert!(
        location.file.ends_with("error_location.rs"),
        "Should capture this test file, got {}",
        location.file
    );
    assert_eq!(location.line, expected_line);
    assert!(location.column > 0, "Column should be one-based");
}

/// **VALUE**: Verifies the `[file:line:column]` rendering used in every error message.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops brackets or a component,
/// which would make the console's error lines unreadable.
#[test]
fn given_error_location_when_displayed_then_renders_bracketed_triplet() {
    // GIVEN: A fixed location
    let location = ErrorLocation {
        file: "scan_client/mod.rs",
        line: 42,
        column: 7,
    };

    // WHEN: Formatting
    let rendered = location.to_string();

    // THEN: Should render exactly [file:line:column]
    assert_eq!(rendered, "[scan_client/mod.rs:42:7]");
}

/// **VALUE**: Verifies that separate call sites receive separate line numbers.
///
/// **BUG THIS CATCHES**: Would catch removal of `#[track_caller]` from a helper, which
/// collapses every captured location onto the helper's own body.
#[test]
fn given_two_call_sites_when_capturing_then_lines_differ() {
    let first = capture_location();
    let second = capture_location();

    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line, "Lines should be sequential");
}
