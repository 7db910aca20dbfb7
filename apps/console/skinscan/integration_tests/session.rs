use crate::helpers::{Captured, scripted_input};

use skinscan::command::Command;
use skinscan::console_page::PageKind;
use skinscan::session::{Flow, Session};

use client_core::config::AppConfig;
use client_core::scan_client::ScanClient;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.ui.card_removal_delay_ms = 0;
    config
}

async fn start(server: &MockServer, input: &str) -> (Session, Captured) {
    let captured = Captured::default();
    let client = ScanClient::new(&server.uri()).unwrap();
    let session = Session::start(
        client,
        fast_config(),
        captured.screen(),
        scripted_input(input),
    )
    .await;
    (session, captured)
}

async fn mount_service(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"analysis": "A*B\nC"})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 7,
            "date": "2024-05-02 10:00",
            "image_path": "uploads/mole.png",
            "analysis": "A*B\nC"
        }])))
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/delete/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(server)
        .await;
}

/// **VALUE**: Walks the whole workflow: login, preview, analysis, history, delete.
///
/// **WHY THIS MATTERS**: Each page binds fresh controllers. This proves navigation
/// rebinds them and that the shared client keeps working across pages.
///
/// **BUG THIS CATCHES**: Would catch login not following the navigation, the upload
/// form missing on the landing page, or delete confirmation not reading the input.
#[tokio::test]
async fn given_running_service_when_walking_workflow_then_each_page_renders() {
    // GIVEN: A service answering every endpoint and one "y" queued for the confirm
    let server = MockServer::start().await;
    mount_service(&server).await;
    let (mut session, captured) = start(&server, "y\n").await;
    assert_eq!(session.page().kind, PageKind::Login);

    // WHEN: Logging in
    let login = "login doctor s3cret".parse::<Command>().unwrap();
    session.execute(login).await;

    // THEN: The landing page is loaded
    assert_eq!(session.page().kind, PageKind::Landing);
    assert!(session.controllers().analysis.is_some());

    // WHEN: Selecting and analyzing an image
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("mole.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();
    session.execute(Command::Select(vec![image])).await;
    session.execute(Command::Analyze).await;

    // THEN: Preview, readiness and the formatted report were printed
    let output = captured.text();
    assert!(output.contains("Preview: mole.png"));
    assert!(output.contains("Image loaded. System ready to scan."));
    assert!(output.contains("ANALYSIS COMPLETE"));
    assert!(output.contains("•B"));
    assert!(output.contains("Data saved to History Logs (/history)."));

    // WHEN: Opening history and deleting the record
    session.execute(Command::Open(String::from("/history"))).await;
    let grid = session.page().grid.clone().unwrap();
    assert_eq!(grid.visible_ids(), [7]);
    session.execute(Command::Delete(7)).await;

    // THEN: The card is gone and the password never reached the screen
    assert!(grid.visible_ids().is_empty());
    let output = captured.text();
    assert!(output.contains("/static/uploads/mole.png"));
    assert!(output.contains("Record #7 removed."));
    assert!(!output.contains("s3cret"));
}

#[tokio::test]
async fn given_refused_login_when_submitted_then_stays_on_login_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"success": false, "message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;
    let (mut session, captured) = start(&server, "").await;

    let login = "login doctor wrong".parse::<Command>().unwrap();
    session.execute(login).await;

    assert_eq!(session.page().kind, PageKind::Login);
    assert!(captured.text().contains("ACCESS DENIED: Invalid credentials"));
}

/// **VALUE**: Verifies commands aimed at forms the page lacks are refused politely.
#[tokio::test]
async fn given_login_page_when_page_commands_issued_then_explained_without_requests() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (mut session, captured) = start(&server, "").await;

    session.execute(Command::Analyze).await;
    session.execute(Command::History).await;
    session.execute(Command::Delete(1)).await;

    let output = captured.text();
    assert!(output.contains("This page has no upload form."));
    assert_eq!(output.matches("This page has no history list.").count(), 2);
}

#[tokio::test]
async fn given_history_page_when_deleting_unknown_record_then_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (mut session, captured) = start(&server, "").await;

    session.execute(Command::Open(String::from("/history"))).await;
    session.execute(Command::Delete(99)).await;

    let output = captured.text();
    assert!(output.contains("No analysis logs found."));
    assert!(output.contains("No record #99 on this page."));
}

/// **VALUE**: Verifies the read loop survives bad input and stops on `quit`.
#[tokio::test]
async fn given_scripted_input_when_run_then_errors_reported_and_quit_honored() {
    let server = MockServer::start().await;
    let (mut session, captured) = start(&server, "help\nbogus\n\npage\nquit\nhelp\n").await;

    let result = session.run().await;

    assert!(result.is_ok());
    let output = captured.text();
    assert_eq!(output.matches("Commands:").count(), 1, "quit should stop the loop");
    assert!(output.contains("Unknown command: bogus"));
    assert!(output.contains("Page: / (login)"));
}

#[tokio::test]
async fn given_closed_input_when_run_then_session_ends() {
    let server = MockServer::start().await;
    let (mut session, _captured) = start(&server, "").await;

    assert!(session.run().await.is_ok());
    assert_eq!(session.execute(Command::Quit).await, Flow::Quit);
}

/// **VALUE**: Verifies a successful signup lands on the login page, like the signup form.
#[tokio::test]
async fn given_new_account_when_signing_up_then_login_page_loaded() {
    // GIVEN: A signup route redirecting to the login page, and the session on another page
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(body_string_contains("age=34"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<form>login</form>"))
        .mount(&server)
        .await;
    let (mut session, captured) = start(&server, "").await;
    session.execute(Command::Open(String::from("/about"))).await;

    // WHEN: Signing up
    let signup = "signup alice s3cret 34".parse::<Command>().unwrap();
    session.execute(signup).await;

    // THEN: Back on the login page with a confirmation
    assert_eq!(session.page().kind, PageKind::Login);
    let output = captured.text();
    assert!(output.contains("Account created. Please log in."));
    assert!(!output.contains("s3cret"));
}

#[tokio::test]
async fn given_taken_username_when_signing_up_then_stays_on_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User already exists."))
        .mount(&server)
        .await;
    let (mut session, captured) = start(&server, "").await;
    session.execute(Command::Open(String::from("/about"))).await;

    let signup = "signup alice s3cret 34".parse::<Command>().unwrap();
    session.execute(signup).await;

    assert_eq!(session.page().kind, PageKind::Blank);
    assert!(captured.text().contains("User already exists."));
}

/// **VALUE**: Verifies logout ends the session and returns to the login page.
///
/// **BUG THIS CATCHES**: Would catch logout leaving the analysis controllers bound.
#[tokio::test]
async fn given_logged_in_when_logging_out_then_login_page_loaded() {
    // GIVEN: A logged-in session on the landing page
    let server = MockServer::start().await;
    mount_service(&server).await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<form>login</form>"))
        .mount(&server)
        .await;
    let (mut session, captured) = start(&server, "").await;
    let login = "login doctor s3cret".parse::<Command>().unwrap();
    session.execute(login).await;
    assert_eq!(session.page().kind, PageKind::Landing);

    // WHEN: Logging out
    session.execute(Command::Logout).await;

    // THEN: Login page, no analysis controller
    assert_eq!(session.page().kind, PageKind::Login);
    assert!(session.controllers().analysis.is_none());
    assert!(captured.text().contains("Logged out."));
}

#[tokio::test]
async fn given_logout_refused_when_logging_out_then_page_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (mut session, captured) = start(&server, "").await;
    session.execute(Command::Open(String::from("/app"))).await;

    session.execute(Command::Logout).await;

    assert_eq!(session.page().kind, PageKind::Landing);
    assert!(captured.text().contains("Logout failed: HTTP 500"));
}

/// **VALUE**: Verifies the session starts on the login page with only the login form bound.
#[tokio::test]
async fn given_new_session_when_started_then_login_page_bound_once() {
    let server = MockServer::start().await;

    let (session, captured) = start(&server, "").await;

    assert_eq!(session.page().kind, PageKind::Login);
    assert!(session.controllers().auth.is_some());
    assert_eq!(captured.text().matches("== / (login) ==").count(), 1);
}
