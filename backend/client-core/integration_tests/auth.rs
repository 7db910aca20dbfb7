use crate::helpers::{
    RecordingControl, RecordingMessage, RecordingNavigator, client_for, unreachable_client,
};

use client_core::controller::auth::AUTHENTICATING_LABEL;
use client_core::controller::{AuthController, AuthEvent, AuthOutcome, AuthSurfaces, FailureClass};
use client_core::page::LoginNotice;

use models::Credentials;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct LoginPage {
    submit: Arc<RecordingControl>,
    message: Arc<RecordingMessage>,
    navigator: Arc<RecordingNavigator>,
}

impl LoginPage {
    fn new() -> Self {
        Self {
            submit: RecordingControl::labelled("LOGIN"),
            message: Arc::new(RecordingMessage::default()),
            navigator: Arc::new(RecordingNavigator::default()),
        }
    }

    fn surfaces(&self) -> AuthSurfaces {
        AuthSurfaces {
            submit: self.submit.clone(),
            message: self.message.clone(),
            navigator: self.navigator.clone(),
        }
    }
}

fn alice() -> Credentials {
    Credentials::from_form_pairs([("username", "alice"), ("password", "pw")]).unwrap()
}

/// **VALUE**: Verifies a successful login navigates and leaves the busy label up.
///
/// **WHY THIS MATTERS**: Navigation and label restoration are mutually exclusive. The page is
/// unloading, so restoring the label would flash the form back before the new page appears.
///
/// **BUG THIS CATCHES**: Would catch a restore call on the success path, a missing JSON
/// content type, or credentials not being sent verbatim.
#[tokio::test]
async fn given_accepted_credentials_when_submitted_then_navigates_without_restore() {
    // GIVEN: A server accepting alice
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "Login successful"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = LoginPage::new();
    let controller = AuthController::new(client_for(&server), page.surfaces(), "/app");

    // WHEN: Submitting
    let outcome = controller.dispatch(AuthEvent::Submit(alice())).await;

    // THEN: Navigation happened and nothing else changed
    assert_eq!(outcome, AuthOutcome::Navigated(String::from("/app")));
    assert_eq!(*page.navigator.visits.lock().unwrap(), ["/app"]);
    assert_eq!(page.submit.current_label(), AUTHENTICATING_LABEL);
    assert!(page.message.notices.lock().unwrap().is_empty());
    assert_eq!(outcome.failure(), None);
}

/// **VALUE**: Verifies a refused login restores the form and shows the prefixed reason.
#[tokio::test]
async fn given_refused_credentials_when_submitted_then_denied_and_restored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"success": false, "message": "Invalid username or password"}),
        ))
        .mount(&server)
        .await;

    let page = LoginPage::new();
    let controller = AuthController::new(client_for(&server), page.surfaces(), "/app");

    let outcome = controller.submit(alice()).await;

    assert_eq!(
        outcome,
        AuthOutcome::Denied(String::from("Invalid username or password"))
    );
    assert_eq!(page.submit.current_label(), "LOGIN");
    assert!(page.submit.is_enabled());
    assert_eq!(
        page.submit.label_history(),
        [AUTHENTICATING_LABEL, "LOGIN"]
    );
    assert_eq!(
        page.message.notices.lock().unwrap()[0].text(),
        "ACCESS DENIED: Invalid username or password"
    );
    assert!(page.navigator.visits.lock().unwrap().is_empty());
}

/// **VALUE**: Verifies an unreachable server shows the connection banner and restores the form.
///
/// **BUG THIS CATCHES**: Would catch a transport error escaping as a panic or leaving the
/// button stuck on its busy label.
#[tokio::test]
async fn given_unreachable_server_when_submitted_then_connection_error() {
    // GIVEN: Nothing listening
    let page = LoginPage::new();
    let controller = AuthController::new(unreachable_client(), page.surfaces(), "/app");

    let outcome = controller.submit(alice()).await;

    assert!(matches!(outcome, AuthOutcome::ConnectionFailed(_)));
    assert_eq!(outcome.failure(), Some(FailureClass::Transport));
    assert_eq!(
        *page.message.notices.lock().unwrap(),
        [LoginNotice::ConnectionError]
    );
    assert_eq!(page.submit.current_label(), "LOGIN");
}

/// **VALUE**: Verifies a non-JSON reply is handled like a connection failure.
#[tokio::test]
async fn given_html_reply_when_submitted_then_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let page = LoginPage::new();
    let controller = AuthController::new(client_for(&server), page.surfaces(), "/app");

    let outcome = controller.submit(alice()).await;

    match outcome {
        AuthOutcome::ConnectionFailed(description) => {
            assert!(description.contains("HTTP 500"), "Got {description}")
        }
        other => panic!("Expected connection failure, got {other:?}"),
    }
}

/// **VALUE**: Verifies a second submit during an in-flight login is rejected without a request.
///
/// **WHY THIS MATTERS**: Overlapping logins used to race; the controller now states that
/// the second attempt is refused.
#[tokio::test]
async fn given_login_in_flight_when_submitted_again_then_rejected() {
    // GIVEN: A slow server expecting exactly one call
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "slow"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = LoginPage::new();
    let controller = AuthController::new(client_for(&server), page.surfaces(), "/app");

    // WHEN: Submitting twice concurrently
    let (first, second) = tokio::join!(controller.submit(alice()), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.submit(alice()).await
    });

    // THEN: Only the first went out
    assert_eq!(first, AuthOutcome::Denied(String::from("slow")));
    assert_eq!(second, AuthOutcome::Rejected);
    assert!(!controller.is_busy());
}
