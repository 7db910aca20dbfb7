use crate::helpers::{
    RecordingControl, RecordingGrid, RecordingMessage, RecordingNavigator, RecordingPreview,
    RecordingResult, ScriptedDialogs, StubFileInput, client_for,
};

use client_core::config::AppConfig;
use client_core::controller::{
    AnalysisSurfaces, AuthSurfaces, Controllers, HistorySurfaces, LoadOutcome, PageSurfaces,
};

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth_surfaces() -> AuthSurfaces {
    AuthSurfaces {
        submit: RecordingControl::labelled("LOGIN"),
        message: Arc::new(RecordingMessage::default()),
        navigator: Arc::new(RecordingNavigator::default()),
    }
}

fn analysis_surfaces() -> AnalysisSurfaces {
    AnalysisSurfaces {
        file_input: StubFileInput::with_files(Vec::new()),
        preview: Arc::new(RecordingPreview::default()),
        result: Arc::new(RecordingResult::default()),
        submit: RecordingControl::labelled("ANALYZE"),
    }
}

/// **VALUE**: Verifies a page only gets the controllers whose surfaces it has.
///
/// **BUG THIS CATCHES**: Would catch the login page fetching history on load, or a
/// missing surface group causing a failure instead of a no-op.
#[tokio::test]
async fn given_login_page_when_bound_then_only_auth_and_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let controllers = Controllers::bind(
        &client_for(&server),
        &AppConfig::default(),
        PageSurfaces {
            auth: Some(auth_surfaces()),
            ..PageSurfaces::default()
        },
    );

    assert!(controllers.auth.is_some());
    assert!(controllers.analysis.is_none());
    assert!(controllers.history.is_none());
    assert!(controllers.initialize().await.is_none());
}

#[tokio::test]
async fn given_empty_page_when_bound_then_no_controllers() {
    let server = MockServer::start().await;

    let controllers = Controllers::bind(
        &client_for(&server),
        &AppConfig::default(),
        PageSurfaces::default(),
    );

    assert!(controllers.auth.is_none());
    assert!(controllers.analysis.is_none());
    assert!(controllers.history.is_none());
}

#[tokio::test]
async fn given_landing_page_when_bound_then_analysis_only() {
    let server = MockServer::start().await;

    let controllers = Controllers::bind(
        &client_for(&server),
        &AppConfig::default(),
        PageSurfaces {
            analysis: Some(analysis_surfaces()),
            ..PageSurfaces::default()
        },
    );

    assert!(controllers.analysis.is_some());
    assert!(controllers.auth.is_none());
    assert!(controllers.history.is_none());
}

/// **VALUE**: Verifies the history page fetches the list exactly once on initialization.
#[tokio::test]
async fn given_history_page_when_initialized_then_history_loaded_once() {
    // GIVEN: A server with one record
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "date": "2024-05-01",
            "image_path": "uploads/a.png",
            "analysis": "Benign"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let grid = Arc::new(RecordingGrid::default());
    let controllers = Controllers::bind(
        &client_for(&server),
        &AppConfig::default(),
        PageSurfaces {
            history: Some(HistorySurfaces {
                grid: grid.clone(),
                dialogs: ScriptedDialogs::answering(false),
            }),
            ..PageSurfaces::default()
        },
    );

    // WHEN: Initializing the page
    let outcome = controllers.initialize().await;

    // THEN: One card built with the default layout
    assert!(matches!(outcome, Some(LoadOutcome::Loaded(ref cards)) if cards.len() == 1));
    assert_eq!(grid.cards()[0].card.image_src, "/static/uploads/a.png");
    assert_eq!(grid.cards()[0].card.excerpt, "Benign...");
}
