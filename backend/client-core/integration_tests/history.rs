use crate::helpers::{RecordingGrid, ScriptedDialogs, client_for, unreachable_client};

use client_core::controller::{
    DeleteOutcome, FailureClass, HistoryController, HistoryEvent, HistoryLayout, HistoryOutcome,
    HistorySurfaces, LoadOutcome,
};
use client_core::controller::history::{
    CONFIRM_DELETE_PROMPT, DELETE_FAILED_ALERT, ERASING_LABEL,
};
use client_core::page::{CardHandle, HistoryView};
use client_core::scan_client::ScanClient;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct HistoryPage {
    grid: Arc<RecordingGrid>,
    dialogs: Arc<ScriptedDialogs>,
}

impl HistoryPage {
    fn confirming(answer: bool) -> Self {
        Self {
            grid: Arc::new(RecordingGrid::default()),
            dialogs: ScriptedDialogs::answering(answer),
        }
    }

    fn controller(&self, client: ScanClient) -> HistoryController {
        self.controller_with_delay(client, Duration::from_millis(5))
    }

    fn controller_with_delay(
        &self,
        client: ScanClient,
        card_removal_delay: Duration,
    ) -> HistoryController {
        HistoryController::new(
            client,
            HistorySurfaces {
                grid: self.grid.clone(),
                dialogs: self.dialogs.clone(),
            },
            HistoryLayout {
                static_prefix: String::from("/static/"),
                excerpt_chars: 10,
                card_removal_delay,
            },
        )
    }

    fn alerts(&self) -> Vec<String> {
        self.dialogs.alerts.lock().unwrap().clone()
    }
}

fn records() -> serde_json::Value {
    json!([
        {
            "id": 7,
            "date": "2024-05-02 10:00",
            "image_path": "uploads/b.png",
            "analysis": "Benign nevus, symmetric borders"
        },
        {
            "id": 3,
            "date": "2024-05-01 09:30",
            "image_path": "uploads/a.png",
            "analysis": "Short"
        }
    ])
}

async fn server_with_records() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records()))
        .mount(&server)
        .await;
    server
}

async fn loaded_cards(controller: &HistoryController) -> Vec<Arc<dyn CardHandle>> {
    match controller.load().await {
        LoadOutcome::Loaded(cards) => cards,
        LoadOutcome::Empty => panic!("Expected cards, got an empty history"),
        LoadOutcome::Unavailable(reason) => panic!("Expected cards, load failed: {reason}"),
    }
}

/// **VALUE**: Verifies an empty history shows the empty placeholder and no cards.
#[tokio::test]
async fn given_no_records_when_loaded_then_empty_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let page = HistoryPage::confirming(true);
    let controller = page.controller(client_for(&server));

    let outcome = controller.load().await;

    assert!(matches!(outcome, LoadOutcome::Empty));
    assert_eq!(
        *page.grid.views.lock().unwrap(),
        [HistoryView::Loading, HistoryView::Empty]
    );
    assert!(page.grid.cards().is_empty());
}

/// **VALUE**: Verifies cards appear in server order with resolved image paths and excerpts.
///
/// **WHY THIS MATTERS**: The server sorts newest first; the client must not reorder.
///
/// **BUG THIS CATCHES**: Would catch sorting by id, a doubled slash in the image URL,
/// or the truncation marker being skipped on short analyses.
#[tokio::test]
async fn given_records_when_loaded_then_cards_in_server_order() {
    // GIVEN: Two records, higher id first
    let server = server_with_records().await;
    let page = HistoryPage::confirming(true);
    let controller = page.controller(client_for(&server));

    // WHEN: Loading
    let cards = loaded_cards(&controller).await;

    // THEN: Card order and content match the response
    assert_eq!(cards.iter().map(|c| c.id()).collect::<Vec<_>>(), [7, 3]);

    let rendered = page.grid.cards();
    assert_eq!(rendered[0].card.image_src, "/static/uploads/b.png");
    assert_eq!(rendered[0].card.date, "2024-05-02 10:00");
    assert_eq!(rendered[0].card.excerpt, "Benign nev...");
    assert_eq!(rendered[1].card.excerpt, "Short...");
    assert_eq!(page.grid.last_view(), Some(HistoryView::Loading));
}

#[tokio::test]
async fn given_unreachable_server_when_loaded_then_unavailable_placeholder() {
    let page = HistoryPage::confirming(true);
    let controller = page.controller(unreachable_client());

    let outcome = controller.dispatch(HistoryEvent::Load).await;

    let HistoryOutcome::Load(outcome) = outcome else {
        panic!("Load event should produce a load outcome");
    };
    assert_eq!(outcome.failure(), Some(FailureClass::Transport));
    assert_eq!(page.grid.last_view(), Some(HistoryView::Unavailable));
}

/// **VALUE**: Verifies a non-list body is treated as unavailable rather than empty.
#[tokio::test]
async fn given_malformed_body_when_loaded_then_unavailable_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let page = HistoryPage::confirming(true);
    let controller = page.controller(client_for(&server));

    let outcome = controller.load().await;

    let LoadOutcome::Unavailable(reason) = outcome else {
        panic!("Expected unavailable history");
    };
    assert!(reason.contains("HTTP 500"), "Reason was: {reason}");
    assert_eq!(page.grid.last_view(), Some(HistoryView::Unavailable));
}

/// **VALUE**: Verifies a confirmed, successful delete removes exactly that card.
///
/// **BUG THIS CATCHES**: Would catch removing the wrong card, skipping the fade, or
/// calling a delete URL without the record id.
#[tokio::test]
async fn given_confirmed_delete_when_server_succeeds_then_only_that_card_removed() {
    // GIVEN: A loaded page and a server accepting deletion of record 7
    let server = server_with_records().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/delete/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let page = HistoryPage::confirming(true);
    let controller = page.controller(client_for(&server));
    let cards = loaded_cards(&controller).await;

    // WHEN: Deleting the first card
    let outcome = controller
        .dispatch(HistoryEvent::Delete {
            id: 7,
            card: cards[0].clone(),
        })
        .await;

    // THEN: It faded and was removed; the other card is untouched
    assert!(matches!(
        outcome,
        HistoryOutcome::Delete(DeleteOutcome::Removed)
    ));
    let rendered = page.grid.cards();
    assert!(rendered[0].faded.load(std::sync::atomic::Ordering::SeqCst));
    assert!(rendered[0].is_removed());
    assert!(!rendered[1].is_removed());
    assert_eq!(rendered[0].control.label_history(), [ERASING_LABEL]);
    assert_eq!(
        *page.dialogs.prompts.lock().unwrap(),
        [CONFIRM_DELETE_PROMPT]
    );
    assert!(page.alerts().is_empty());
    assert!(!controller.is_deleting(7));
}

/// **VALUE**: Verifies a server refusal keeps the card and tells the user why.
///
/// **WHY THIS MATTERS**: The card must stay usable for a retry, so its button label has
/// to come back.
#[tokio::test]
async fn given_confirmed_delete_when_server_refuses_then_card_kept_and_reason_alerted() {
    let server = server_with_records().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/delete/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": false, "message": "locked"})),
        )
        .mount(&server)
        .await;

    let page = HistoryPage::confirming(true);
    let controller = page.controller(client_for(&server));
    let cards = loaded_cards(&controller).await;

    let outcome = controller.delete(3, cards[1].clone()).await;

    assert_eq!(outcome, DeleteOutcome::Refused(String::from("locked")));
    let card = &page.grid.cards()[1];
    assert!(!card.is_removed());
    assert_eq!(card.control.current_label(), "Delete Log");
    assert_eq!(page.alerts(), ["Error: locked"]);
}

#[tokio::test]
async fn given_declined_confirmation_when_deleting_then_no_request() {
    let server = server_with_records().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let page = HistoryPage::confirming(false);
    let controller = page.controller(client_for(&server));
    let cards = loaded_cards(&controller).await;

    let outcome = controller.delete(7, cards[0].clone()).await;

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert!(page.grid.cards()[0].control.label_history().is_empty());
    assert!(!page.grid.cards()[0].is_removed());
}

/// **VALUE**: Verifies a transport failure shows the generic alert and restores the label.
#[tokio::test]
async fn given_unreachable_server_when_deleting_then_generic_alert() {
    let server = server_with_records().await;
    let page = HistoryPage::confirming(true);
    let cards = loaded_cards(&page.controller(client_for(&server))).await;

    let controller = page.controller(unreachable_client());
    let outcome = controller.delete(7, cards[0].clone()).await;

    assert_eq!(outcome.failure(), Some(FailureClass::Transport));
    assert_eq!(page.alerts(), [DELETE_FAILED_ALERT]);
    let card = &page.grid.cards()[0];
    assert_eq!(card.control.label_history(), [ERASING_LABEL, "Delete Log"]);
    assert!(!card.is_removed());
}

/// **VALUE**: Verifies a second delete of the same record is ignored while the first runs.
///
/// **BUG THIS CATCHES**: Would catch a double click sending two DELETE requests.
#[tokio::test]
async fn given_delete_in_flight_when_same_record_deleted_again_then_rejected() {
    let server = server_with_records().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/delete/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = HistoryPage::confirming(true);
    let controller = page.controller(client_for(&server));
    let cards = loaded_cards(&controller).await;

    let (first, second) = tokio::join!(controller.delete(7, cards[0].clone()), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.delete(7, cards[0].clone()).await
    });

    assert_eq!(first, DeleteOutcome::Removed);
    assert_eq!(second, DeleteOutcome::Rejected);
    assert_eq!(page.dialogs.prompts.lock().unwrap().len(), 1);
}

/// **VALUE**: Verifies a deleted card is removed even when its fade transition is cut short.
///
/// **WHY THIS MATTERS**: The record is already gone server-side. If leaving the page or
/// cancelling the task during the fade kept the card, it would point at a deleted record.
///
/// **BUG THIS CATCHES**: Would catch the removal guard's `Drop` being lost, or the guard
/// being applied to the wrong card.
#[tokio::test]
async fn given_successful_delete_when_transition_cancelled_then_card_still_removed() {
    // GIVEN: A long removal delay and a server accepting the delete
    let server = server_with_records().await;
    Mock::given(method("DELETE"))
        .and(path("/api/history/delete/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let page = HistoryPage::confirming(true);
    let controller = page.controller_with_delay(client_for(&server), Duration::from_secs(30));
    let cards = loaded_cards(&controller).await;

    // WHEN: The delete is cancelled during the wait
    let result = tokio::time::timeout(
        Duration::from_millis(500),
        controller.delete(7, cards[0].clone()),
    )
    .await;

    // THEN: It timed out, yet only that card was removed and the id is free again
    assert!(result.is_err(), "Delete should still be waiting out the fade");
    let rendered = page.grid.cards();
    assert!(rendered[0].faded.load(std::sync::atomic::Ordering::SeqCst));
    assert!(rendered[0].is_removed());
    assert!(!rendered[1].is_removed());
    assert!(!controller.is_deleting(7));
}
