use crate::helpers::{client_for, png};

use client_core::error::scan_client::ScanClientError;
use client_core::scan_client::ScanClient;

use common::HttpStatusCode;
use models::{AnalysisResponse, Credentials, SignupForm, SignupReply};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn given_base_url_without_trailing_slash_when_built_then_slash_added() {
    let client = ScanClient::new("http://127.0.0.1:5000/scanner").unwrap();

    assert_eq!(client.base_url().as_str(), "http://127.0.0.1:5000/scanner/");
}

#[test]
fn given_invalid_base_url_when_built_then_url_parse_error() {
    let result = ScanClient::new("not a url");

    assert!(matches!(result, Err(ScanClientError::UrlParse { .. })));
}

/// **VALUE**: Verifies endpoints are resolved under a base path, not the host root.
///
/// **BUG THIS CATCHES**: Would catch absolute endpoint paths that drop a deployment prefix.
#[tokio::test]
async fn given_base_path_when_listing_history_then_request_under_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scanner/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ScanClient::new(&format!("{}/scanner", server.uri())).unwrap();

    let records = client.list_history().await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn given_record_id_when_deleting_then_id_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/delete/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).delete_history(42).await.unwrap();

    assert!(response.success);
    assert!(response.message.is_none());
}

/// **VALUE**: Verifies undecodable bodies carry the HTTP status into the error.
#[tokio::test]
async fn given_html_error_page_when_decoding_then_status_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let error = client_for(&server).list_history().await.unwrap_err();

    let ScanClientError::Decode { status, .. } = error else {
        panic!("Expected a decode error, got {error:?}");
    };
    assert_eq!(status, HttpStatusCode::from(502));
}

#[tokio::test]
async fn given_error_body_on_server_error_when_analyzing_then_body_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "quota"})))
        .mount(&server)
        .await;

    let raw = client_for(&server).analyze(&png("mole.png")).await.unwrap();

    assert_eq!(
        AnalysisResponse::classify(raw).unwrap(),
        AnalysisResponse::Generic {
            message: String::from("quota")
        }
    );
}

/// **VALUE**: Verifies the session cookie from login is sent on later calls.
///
/// **WHY THIS MATTERS**: The service authorizes analysis and history by session cookie;
/// without a cookie jar every call after login would be anonymous.
#[tokio::test]
async fn given_login_sets_cookie_when_listing_history_then_cookie_sent() {
    // GIVEN: A login that sets a session cookie and a history route requiring it
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/")
                .set_body_json(json!({"success": true})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let credentials = Credentials::builder()
        .with_username("doctor")
        .with_password("secret")
        .build()
        .unwrap();

    // WHEN: Logging in, then listing history through a clone
    let login = client.login(&credentials).await.unwrap();
    let records = client.clone().list_history().await.unwrap();

    // THEN: Both succeed
    assert!(login.success);
    assert!(records.is_empty());
}

#[tokio::test]
async fn given_timeout_when_server_is_slow_then_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client =
        ScanClient::with_timeout(&server.uri(), Some(Duration::from_millis(50))).unwrap();

    let result = client.list_history().await;

    assert!(matches!(result, Err(ScanClientError::Http { .. })));
}

/// **VALUE**: Verifies a signup that redirects to the login page is read as created.
///
/// **WHY THIS MATTERS**: The signup route answers with HTML, so success can only be told
/// apart by where the redirect lands.
///
/// **BUG THIS CATCHES**: Would catch posting JSON instead of a url-encoded form, or
/// treating the followed redirect's 200 as the signup page itself.
#[tokio::test]
async fn given_new_account_when_signing_up_then_created() {
    // GIVEN: A signup route that redirects to the login page
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=alice"))
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

    let form = SignupForm::new("alice", "s3cret", "34").unwrap();

    // WHEN: Signing up
    let reply = client_for(&server).signup(&form).await.unwrap();

    // THEN: Created
    assert_eq!(reply, SignupReply::Created);
}

#[tokio::test]
async fn given_taken_username_when_signing_up_then_user_exists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User already exists. <a href='/'>Login</a>"),
        )
        .mount(&server)
        .await;

    let form = SignupForm::new("alice", "s3cret", "34").unwrap();

    let reply = client_for(&server).signup(&form).await.unwrap();

    assert_eq!(reply, SignupReply::UserExists);
}

#[tokio::test]
async fn given_server_error_when_signing_up_then_failed_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let form = SignupForm::new("alice", "s3cret", "34").unwrap();

    let reply = client_for(&server).signup(&form).await.unwrap();

    assert_eq!(reply, SignupReply::Failed(HttpStatusCode::from(500)));
}

/// **VALUE**: Verifies logout drops the session cookie from the shared jar.
///
/// **BUG THIS CATCHES**: Would catch a logout that leaves later calls authenticated.
#[tokio::test]
async fn given_logged_in_when_logging_out_then_session_cookie_dropped() {
    // GIVEN: A session cookie from login and a logout that expires it
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/")
                .set_body_json(json!({"success": true})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/")
                .insert_header(
                    "set-cookie",
                    "session=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; Path=/",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<form>login</form>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let credentials = Credentials::builder()
        .with_username("doctor")
        .with_password("secret")
        .build()
        .unwrap();
    client.login(&credentials).await.unwrap();

    // WHEN: Logging out, then listing history
    client.logout().await.unwrap();
    client.list_history().await.unwrap();

    // THEN: The history request went out without the session cookie
    let requests = server.received_requests().await.unwrap();
    let history = requests
        .iter()
        .find(|request| request.url.path() == "/api/history")
        .unwrap();
    assert!(history.headers.get("cookie").is_none());
}

#[tokio::test]
async fn given_logout_refused_when_logging_out_then_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let error = client_for(&server).logout().await.unwrap_err();

    assert!(matches!(error, ScanClientError::Status { .. }));
    assert!(error.description().contains("HTTP 500"));
}
