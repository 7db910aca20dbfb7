use crate::page::{AnalysisView, HistoryView, LoginNotice};

use models::FormattedAnalysis;

#[test]
fn given_denied_notice_when_rendered_then_prefixed_banner() {
    let notice = LoginNotice::AccessDenied(String::from("Invalid username or password"));

    assert_eq!(notice.text(), "ACCESS DENIED: Invalid username or password");
    assert_eq!(LoginNotice::ConnectionError.text(), "CONNECTION ERROR");
}

/// **VALUE**: Verifies the busy state is the two-line progress message.
#[test]
fn given_busy_view_when_rendered_then_two_lines() {
    assert_eq!(AnalysisView::Busy.lines().len(), 2);
    assert!(!AnalysisView::Busy.is_error());
}

/// **VALUE**: Verifies the completion panel wraps the analysis and links to history.
#[test]
fn given_complete_view_when_rendered_then_heading_body_and_link() {
    let view = AnalysisView::Complete {
        analysis: FormattedAnalysis::from_text("A*B"),
        history_path: String::from("/history"),
    };

    let lines = view.lines();

    assert_eq!(lines.first().map(String::as_str), Some("ANALYSIS COMPLETE"));
    assert!(lines.contains(&String::from("•B")));
    assert!(lines.last().unwrap().contains("/history"));
    assert!(!view.is_error());
}

#[test]
fn given_error_views_when_checked_then_flagged() {
    assert!(AnalysisView::MissingFile.is_error());
    assert!(AnalysisView::Blocked.is_error());
    assert!(AnalysisView::NetworkError(String::from("x")).is_error());
    assert_eq!(
        AnalysisView::SystemError(String::from("server timeout")).lines(),
        ["[SYSTEM ERROR]: server timeout"]
    );
}

#[test]
fn given_history_placeholders_when_rendered_then_distinct_text() {
    assert_ne!(HistoryView::Empty.text(), HistoryView::Unavailable.text());
    assert_ne!(HistoryView::Loading.text(), HistoryView::Empty.text());
}
