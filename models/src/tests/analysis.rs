use crate::analysis::{AnalysisResponse, FormattedAnalysis, RawAnalysisResponse};
use crate::ModelError;

fn raw(body: serde_json::Value) -> RawAnalysisResponse {
    serde_json::from_value(body).expect("body should deserialize")
}

/// **VALUE**: Verifies that an error containing the safety-filter phrase is classified as blocked.
///
/// **WHY THIS MATTERS**: Blocked uploads get their own explanatory panel. Routing them to the
/// generic panel would show users a raw filter message instead of guidance.
///
/// **BUG THIS CATCHES**: Would catch a marker typo or a swapped branch order.
#[test]
fn given_error_with_blocked_marker_when_classified_then_blocked() {
    let response = AnalysisResponse::classify(raw(serde_json::json!({
        "error": "blocked prompt: medical"
    })))
    .unwrap();

    assert_eq!(
        response,
        AnalysisResponse::Blocked {
            message: String::from("blocked prompt: medical")
        }
    );
}

#[test]
fn given_error_without_marker_when_classified_then_generic() {
    let response = AnalysisResponse::classify(raw(serde_json::json!({
        "error": "server timeout"
    })))
    .unwrap();

    assert_eq!(
        response,
        AnalysisResponse::Generic {
            message: String::from("server timeout")
        }
    );
}

/// **VALUE**: Verifies the marker comparison is case-sensitive.
///
/// **BUG THIS CATCHES**: Would catch a switch to case-insensitive matching, which would
/// change which panel users see for server messages that merely mention the phrase.
#[test]
fn given_marker_in_other_case_when_classified_then_generic() {
    let response =
        AnalysisResponse::try_from(raw(serde_json::json!({"error": "Blocked Prompt"}))).unwrap();

    assert!(matches!(response, AnalysisResponse::Generic { .. }));
}

#[test]
fn given_analysis_only_when_classified_then_success() {
    let response =
        AnalysisResponse::classify(raw(serde_json::json!({"analysis": "Smooth border"}))).unwrap();

    assert_eq!(
        response,
        AnalysisResponse::Success {
            analysis: String::from("Smooth border")
        }
    );
}

/// **VALUE**: Verifies that an empty error string does not mask a present analysis.
///
/// **BUG THIS CATCHES**: Would catch treating `"error": ""` as a failure, which would
/// discard a valid analysis.
#[test]
fn given_empty_error_and_analysis_when_classified_then_success() {
    let response = AnalysisResponse::classify(raw(serde_json::json!({
        "error": "",
        "analysis": "ok"
    })))
    .unwrap();

    assert!(matches!(response, AnalysisResponse::Success { .. }));
}

#[test]
fn given_neither_field_when_classified_then_classification_error() {
    let result = AnalysisResponse::classify(raw(serde_json::json!({"status": "done"})));

    match result {
        Err(ModelError::Classification { message, .. }) => {
            assert!(message.contains("neither"), "Unexpected message: {message}")
        }
        other => panic!("Expected classification error, got {other:?}"),
    }
}

/// **VALUE**: Verifies the bullet and newline transformations on the canonical sample.
///
/// **WHY THIS MATTERS**: The completion panel must show one break per `*` and one per
/// newline, with the bullet glyph leading each bullet line.
#[test]
fn given_bullet_and_newline_when_formatted_then_two_breaks() {
    let formatted = FormattedAnalysis::from_text("A*B\nC");

    assert_eq!(formatted.break_count(), 2);
    assert_eq!(formatted.lines(), ["A", "•B", "C"]);
    assert_eq!(formatted.to_markup(), "A<br>•B<br>C");
    assert_eq!(formatted.to_string(), "A\n•B\nC");
}

#[test]
fn given_plain_text_when_formatted_then_single_line() {
    let formatted = FormattedAnalysis::from_text("No bullets here");

    assert_eq!(formatted.break_count(), 0);
    assert_eq!(formatted.to_markup(), "No bullets here");
}

/// **VALUE**: Verifies analysis text cannot inject markup into the completion panel.
///
/// **BUG THIS CATCHES**: Would catch dropping the escape step from `to_markup()`.
#[test]
fn given_angle_brackets_when_rendered_as_markup_then_escaped() {
    let formatted = FormattedAnalysis::from_text("<b>x</b> & y");

    assert_eq!(formatted.to_markup(), "&lt;b&gt;x&lt;/b&gt; &amp; y");
}

#[test]
fn given_double_asterisk_when_formatted_then_each_asterisk_breaks() {
    let formatted = FormattedAnalysis::from_text("**Color**");

    assert_eq!(formatted.lines(), ["", "•", "•Color", "•", "•"]);
    assert_eq!(formatted.break_count(), 4);
}
