use crate::helpers::{
    RecordingControl, RecordingPreview, RecordingResult, StubFileInput, client_for, png,
    unreachable_client,
};

use client_core::controller::{
    AnalysisController, AnalysisEvent, AnalysisOutcome, AnalysisSurfaces, FailureClass,
    ServerFailure,
};
use client_core::page::AnalysisView;
use client_core::scan_client::ScanClient;

use models::SelectedFile;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct AppPage {
    file_input: Arc<StubFileInput>,
    preview: Arc<RecordingPreview>,
    result: Arc<RecordingResult>,
    submit: Arc<RecordingControl>,
}

impl AppPage {
    fn with_files(files: Vec<SelectedFile>) -> Self {
        Self {
            file_input: StubFileInput::with_files(files),
            preview: Arc::new(RecordingPreview::default()),
            result: Arc::new(RecordingResult::default()),
            submit: RecordingControl::labelled("ANALYZE"),
        }
    }

    fn controller(&self, client: ScanClient) -> AnalysisController {
        AnalysisController::new(
            client,
            AnalysisSurfaces {
                file_input: self.file_input.clone(),
                preview: self.preview.clone(),
                result: self.result.clone(),
                submit: self.submit.clone(),
            },
            "/history",
        )
    }
}

async fn server_answering(body: serde_json::Value, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;
    server
}

/// **VALUE**: Verifies that submitting without a file never reaches the network.
///
/// **WHY THIS MATTERS**: This is the only purely client-side error. Sending an empty form
/// would cost a round trip and produce a confusing server message instead.
///
/// **BUG THIS CATCHES**: Would catch the selection check moving after the request.
#[tokio::test]
async fn given_no_file_when_submitted_then_local_error_and_no_request() {
    // GIVEN: A server that must not be called
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let page = AppPage::with_files(Vec::new());
    let controller = page.controller(client_for(&server));

    // WHEN: Submitting
    let outcome = controller.dispatch(AnalysisEvent::Submit).await;

    // THEN: Validation message only
    assert_eq!(outcome, AnalysisOutcome::MissingFile);
    assert_eq!(outcome.failure(), Some(FailureClass::ClientValidation));
    assert_eq!(page.result.all(), [AnalysisView::MissingFile]);
}

#[tokio::test]
async fn given_two_files_when_submitted_then_local_error() {
    let page = AppPage::with_files(vec![png("a.png"), png("b.png")]);
    let controller = page.controller(unreachable_client());

    let outcome = controller.submit().await;

    assert_eq!(outcome, AnalysisOutcome::MultipleFiles(2));
    assert_eq!(page.result.last(), Some(AnalysisView::MultipleFiles(2)));
}

/// **VALUE**: Verifies the blocked-content reply gets the dedicated panel and keeps the file.
///
/// **BUG THIS CATCHES**: Would catch blocked replies falling through to the generic panel,
/// or the file input being cleared so the user cannot retry.
#[tokio::test]
async fn given_blocked_reply_when_submitted_then_blocked_panel() {
    let server = server_answering(json!({"error": "blocked prompt: medical"}), 500).await;
    let page = AppPage::with_files(vec![png("mole.png")]);
    let controller = page.controller(client_for(&server));

    let outcome = controller.submit().await;

    assert_eq!(
        outcome,
        AnalysisOutcome::Blocked(String::from("blocked prompt: medical"))
    );
    assert_eq!(
        outcome.failure(),
        Some(FailureClass::ServerReported(ServerFailure::ContentBlocked))
    );
    assert_eq!(page.result.last(), Some(AnalysisView::Blocked));
    assert_eq!(page.file_input.clears.load(Ordering::SeqCst), 0);
    assert_eq!(page.file_input.selected_count(), 1);
}

#[tokio::test]
async fn given_generic_error_reply_when_submitted_then_system_error_panel() {
    let server = server_answering(json!({"error": "server timeout"}), 500).await;
    let page = AppPage::with_files(vec![png("mole.png")]);
    let controller = page.controller(client_for(&server));

    let outcome = controller.submit().await;

    assert_eq!(
        outcome.failure(),
        Some(FailureClass::ServerReported(ServerFailure::Generic))
    );
    assert_eq!(
        page.result.last(),
        Some(AnalysisView::SystemError(String::from("server timeout")))
    );
}

/// **VALUE**: Verifies a 400 reply carrying a JSON error is read as a server-reported error.
///
/// **BUG THIS CATCHES**: Would catch the client rejecting non-2xx statuses before reading
/// the body, which would turn every server message into a network error.
#[tokio::test]
async fn given_bad_request_with_error_body_when_submitted_then_generic_error() {
    let server = server_answering(json!({"error": "No selected file"}), 400).await;
    let page = AppPage::with_files(vec![png("mole.png")]);
    let controller = page.controller(client_for(&server));

    let outcome = controller.submit().await;

    assert_eq!(
        outcome,
        AnalysisOutcome::ServerError(String::from("No selected file"))
    );
}

/// **VALUE**: Verifies the success path: busy state, formatted report, cleared input.
///
/// **WHY THIS MATTERS**: A repeat submission must require a fresh selection, but the preview
/// stays on screen next to the report.
///
/// **BUG THIS CATCHES**: Would catch missing bullet or newline breaks, the busy state being
/// skipped, the preview being cleared, or the upload not using the `file` multipart field.
#[tokio::test]
async fn given_analysis_reply_when_submitted_then_report_rendered_and_input_cleared() {
    // GIVEN: A server returning an analysis with one bullet and one newline
    let server = server_answering(json!({"analysis": "A*B\nC"}), 200).await;
    let page = AppPage::with_files(vec![png("mole.png")]);
    let controller = page.controller(client_for(&server));

    // WHEN: Submitting
    let outcome = controller.submit().await;

    // THEN: Two breaks, busy then complete, input cleared once
    let AnalysisOutcome::Completed(formatted) = outcome else {
        panic!("Expected completion, got {outcome:?}");
    };
    assert_eq!(formatted.break_count(), 2);
    assert_eq!(formatted.to_markup(), "A<br>•B<br>C");

    let views = page.result.all();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0], AnalysisView::Busy);
    assert_eq!(
        views[1],
        AnalysisView::Complete {
            analysis: formatted,
            history_path: String::from("/history"),
        }
    );
    assert_eq!(page.file_input.clears.load(Ordering::SeqCst), 1);
    assert_eq!(page.file_input.selected_count(), 0);
    assert!(page.preview.shown.lock().unwrap().is_empty());
    assert!(page.submit.is_enabled());

    // AND: The upload was multipart with the file under "file"
    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""), "Missing file field: {body}");
    assert!(body.contains("filename=\"mole.png\""));
}

#[tokio::test]
async fn given_unreachable_server_when_submitted_then_network_error_panel() {
    let page = AppPage::with_files(vec![png("mole.png")]);
    let controller = page.controller(unreachable_client());

    let outcome = controller.submit().await;

    assert_eq!(outcome.failure(), Some(FailureClass::Transport));
    assert!(matches!(
        page.result.last(),
        Some(AnalysisView::NetworkError(_))
    ));
    assert_eq!(page.file_input.selected_count(), 1);
}

/// **VALUE**: Verifies a reply with neither field is reported as a transport-class failure.
#[tokio::test]
async fn given_reply_without_fields_when_submitted_then_network_error_panel() {
    let server = server_answering(json!({"status": "done"}), 200).await;
    let page = AppPage::with_files(vec![png("mole.png")]);
    let controller = page.controller(client_for(&server));

    let outcome = controller.submit().await;

    assert!(matches!(outcome, AnalysisOutcome::TransportFailed(_)));
    assert!(matches!(
        page.result.last(),
        Some(AnalysisView::NetworkError(_))
    ));
}

/// **VALUE**: Verifies selecting a file previews it locally and resets the result box.
#[tokio::test]
async fn given_file_selected_when_dispatched_then_preview_and_ready() {
    let page = AppPage::with_files(Vec::new());
    let controller = page.controller(unreachable_client());

    let outcome = controller
        .dispatch(AnalysisEvent::FileSelected(Some(png("mole.png"))))
        .await;

    assert_eq!(outcome, AnalysisOutcome::Previewed);
    let shown = page.preview.shown.lock().unwrap();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].data_url().starts_with("data:image/png;base64,"));
    assert_eq!(page.result.all(), [AnalysisView::Ready]);
}

#[tokio::test]
async fn given_cancelled_selection_when_dispatched_then_nothing_changes() {
    let page = AppPage::with_files(Vec::new());
    let controller = page.controller(unreachable_client());

    let outcome = controller.dispatch(AnalysisEvent::FileSelected(None)).await;

    assert_eq!(outcome, AnalysisOutcome::NoFile);
    assert!(page.result.all().is_empty());
    assert!(page.preview.shown.lock().unwrap().is_empty());
}

/// **VALUE**: Verifies a response arriving after a newer selection does not overwrite the page.
///
/// **WHY THIS MATTERS**: Without the epoch check, a slow analysis of the previous image would
/// replace the "ready" message for the image now on screen.
#[tokio::test]
async fn given_new_selection_during_upload_when_reply_arrives_then_discarded() {
    // GIVEN: A slow analysis
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"analysis": "old image"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let page = AppPage::with_files(vec![png("old.png")]);
    let controller = page.controller(client_for(&server));

    // WHEN: A new file is picked while the upload is pending
    let (outcome, _) = tokio::join!(controller.submit(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        page.file_input.select(vec![png("new.png")]);
        controller.on_file_selected(Some(&png("new.png")))
    });

    // THEN: The stale reply is dropped and the new selection stays intact
    assert_eq!(outcome, AnalysisOutcome::Superseded);
    assert_eq!(page.result.last(), Some(AnalysisView::Ready));
    assert_eq!(page.file_input.selected_count(), 1);
}

#[tokio::test]
async fn given_upload_in_flight_when_submitted_again_then_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"analysis": "done"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = AppPage::with_files(vec![png("mole.png")]);
    let controller = page.controller(client_for(&server));

    let (first, second) = tokio::join!(controller.submit(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.submit().await
    });

    assert!(matches!(first, AnalysisOutcome::Completed(_)));
    assert_eq!(second, AnalysisOutcome::Rejected);
}

/// **VALUE**: Verifies a submit with no file during an upload leaves the busy panel alone.
///
/// **WHY THIS MATTERS**: A rejected submit must not change the page. Validating first
/// would replace the busy panel with a missing-file error while the upload still runs.
#[tokio::test]
async fn given_upload_in_flight_when_submitted_without_file_then_rejected_silently() {
    // GIVEN: A slow upload in progress
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"analysis": "done"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = AppPage::with_files(vec![png("mole.png")]);
    let controller = page.controller(client_for(&server));

    // WHEN: The picker is emptied and submit is pressed again mid-upload
    let (first, second) = tokio::join!(controller.submit(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        page.file_input.select(Vec::new());
        let outcome = controller.submit().await;
        (outcome, page.result.all())
    });

    // THEN: The second submit is rejected and rendered nothing
    assert!(matches!(first, AnalysisOutcome::Completed(_)));
    let (outcome, views_during_upload) = second;
    assert_eq!(outcome, AnalysisOutcome::Rejected);
    assert_eq!(views_during_upload, [AnalysisView::Busy]);
}
