//! History page controller: list on load, delete on request.

use crate::controller::in_flight::InFlightSet;
use crate::controller::{FailureClass, ServerFailure};
use crate::page::{CardHandle, Dialogs, HistoryGrid, HistoryView};
use crate::scan_client::ScanClient;

use models::HistoryCard;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

pub const CONFIRM_DELETE_PROMPT: &str =
    "CONFIRM DELETION: This record will be permanently erased.";
pub const ERASING_LABEL: &str = "Erasing...";
pub const DELETE_FAILED_ALERT: &str = "System Error: Could not delete record.";

#[derive(Clone)]
pub struct HistorySurfaces {
    pub grid: Arc<dyn HistoryGrid>,
    pub dialogs: Arc<dyn Dialogs>,
}

/// Card layout settings.
#[derive(Debug, Clone)]
pub struct HistoryLayout {
    pub static_prefix: String,
    pub excerpt_chars: usize,
    pub card_removal_delay: Duration,
}

pub enum HistoryEvent {
    Load,
    Delete { id: i64, card: Arc<dyn CardHandle> },
}

pub enum LoadOutcome {
    /// Cards in server order.
    Loaded(Vec<Arc<dyn CardHandle>>),
    Empty,
    Unavailable(String),
}

impl LoadOutcome {
    pub fn failure(&self) -> Option<FailureClass> {
        match self {
            LoadOutcome::Unavailable(_) => Some(FailureClass::Transport),
            LoadOutcome::Loaded(_) | LoadOutcome::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    /// The user dismissed the confirmation.
    Declined,
    /// The server refused; the card stays.
    Refused(String),
    TransportFailed(String),
    /// A delete of the same record was still in flight.
    Rejected,
}

impl DeleteOutcome {
    pub fn failure(&self) -> Option<FailureClass> {
        match self {
            DeleteOutcome::Refused(_) => Some(FailureClass::ServerReported(ServerFailure::Generic)),
            DeleteOutcome::TransportFailed(_) => Some(FailureClass::Transport),
            DeleteOutcome::Removed | DeleteOutcome::Declined | DeleteOutcome::Rejected => None,
        }
    }
}

/// Outcome of a dispatched history event.
pub enum HistoryOutcome {
    Load(LoadOutcome),
    Delete(DeleteOutcome),
}

pub struct HistoryController {
    client: ScanClient,
    surfaces: HistorySurfaces,
    layout: HistoryLayout,
    deleting: InFlightSet,
}

impl HistoryController {
    pub fn new(client: ScanClient, surfaces: HistorySurfaces, layout: HistoryLayout) -> Self {
        Self {
            client,
            surfaces,
            layout,
            deleting: InFlightSet::new(),
        }
    }

    pub async fn dispatch(&self, event: HistoryEvent) -> HistoryOutcome {
        match event {
            HistoryEvent::Load => HistoryOutcome::Load(self.load().await),
            HistoryEvent::Delete { id, card } => HistoryOutcome::Delete(self.delete(id, card).await),
        }
    }

    /// Fetch the history and render one card per record.
    ///
    /// Failures leave a persistent placeholder; nothing is retried.
    pub async fn load(&self) -> LoadOutcome {
        let grid = &self.surfaces.grid;
        grid.render(&HistoryView::Loading);

        let records = match self.client.list_history().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to load history: {}", e);
                grid.render(&HistoryView::Unavailable);
                return LoadOutcome::Unavailable(e.description());
            }
        };

        if records.is_empty() {
            info!("History is empty");
            grid.render(&HistoryView::Empty);
            return LoadOutcome::Empty;
        }

        info!("Rendering {} history records", records.len());
        grid.clear();
        let cards = records
            .iter()
            .map(|record| {
                grid.append(HistoryCard::new(
                    record,
                    &self.layout.static_prefix,
                    self.layout.excerpt_chars,
                ))
            })
            .collect();

        LoadOutcome::Loaded(cards)
    }

    /// Delete one record after confirmation and drop its card.
    ///
    /// Removal is optimistic: the list is not fetched again afterwards.
    pub async fn delete(&self, id: i64, card: Arc<dyn CardHandle>) -> DeleteOutcome {
        let Some(_ticket) = self.deleting.try_begin(id) else {
            warn!("Delete of record {} ignored: already in progress", id);
            return DeleteOutcome::Rejected;
        };

        if !self.surfaces.dialogs.confirm(CONFIRM_DELETE_PROMPT) {
            debug!("Delete of record {} declined", id);
            return DeleteOutcome::Declined;
        }

        let control = card.delete_control();
        let original_label = control.label();
        control.set_label(ERASING_LABEL);

        info!("Deleting history record {}", id);

        match self.client.delete_history(id).await {
            Ok(response) if response.success => {
                info!("Record {} deleted", id);
                self.retire(card).await;
                DeleteOutcome::Removed
            }
            Ok(response) => {
                let reason = response.reason().to_string();
                warn!("Delete of record {} refused: {}", id, reason);
                control.set_label(&original_label);
                self.surfaces.dialogs.alert(&format!("Error: {reason}"));
                DeleteOutcome::Refused(reason)
            }
            Err(e) => {
                warn!("Delete of record {} failed: {}", id, e);
                control.set_label(&original_label);
                self.surfaces.dialogs.alert(DELETE_FAILED_ALERT);
                DeleteOutcome::TransportFailed(e.description())
            }
        }
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(id)
    }

    /// Fade the card, wait out the transition, remove it.
    async fn retire(&self, card: Arc<dyn CardHandle>) {
        let removal = CardRemoval::new(card);
        removal.fade_out();
        tokio::time::sleep(self.layout.card_removal_delay).await;
        removal.finish();
    }
}

/// Removes its card when finished or dropped, so a cancelled transition
/// still detaches the card.
struct CardRemoval {
    card: Option<Arc<dyn CardHandle>>,
}

impl CardRemoval {
    fn new(card: Arc<dyn CardHandle>) -> Self {
        Self { card: Some(card) }
    }

    fn fade_out(&self) {
        if let Some(card) = &self.card {
            card.fade_out();
        }
    }

    fn finish(mut self) {
        if let Some(card) = self.card.take() {
            card.remove();
        }
    }
}

impl Drop for CardRemoval {
    fn drop(&mut self) {
        if let Some(card) = self.card.take() {
            debug!("Card {} removed without finishing its transition", card.id());
            card.remove();
        }
    }
}
