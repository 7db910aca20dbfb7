//! Page surfaces the controllers render into.
//!
//! Controllers never reach for a document. Each page hands them `Arc<dyn _>`
//! handles implementing these traits, so the same orchestration drives the
//! console front end or a recording fake in tests. All methods are
//! synchronous; the only suspension points live in the controllers.

pub mod view;

pub use view::{AnalysisView, HistoryView, LoginNotice};

use crate::preview::ImagePreview;

use models::{HistoryCard, SelectedFile};

use std::sync::Arc;

/// A button whose label doubles as its busy indicator.
pub trait Control: Send + Sync {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_enabled(&self, enabled: bool);
}

/// Single status line under the login form.
pub trait MessageArea: Send + Sync {
    fn show(&self, notice: &LoginNotice);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// The file picker of the analysis form.
pub trait FileInput: Send + Sync {
    fn selected(&self) -> Vec<SelectedFile>;
    fn clear(&self);
}

pub trait PreviewArea: Send + Sync {
    fn show(&self, preview: &ImagePreview);
}

/// The analysis result box.
pub trait ResultArea: Send + Sync {
    fn render(&self, view: &AnalysisView);
}

/// Container of history cards.
pub trait HistoryGrid: Send + Sync {
    /// Replace the grid contents with a placeholder.
    fn render(&self, view: &HistoryView);
    fn clear(&self);
    fn append(&self, card: HistoryCard) -> Arc<dyn CardHandle>;
}

/// One rendered history card.
pub trait CardHandle: Send + Sync {
    fn id(&self) -> i64;
    fn delete_control(&self) -> Arc<dyn Control>;
    /// Start the fade-and-shrink transition.
    fn fade_out(&self);
    /// Detach the card. Must tolerate repeated calls.
    fn remove(&self);
}

/// Blocking browser-style dialogs.
pub trait Dialogs: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
    fn alert(&self, message: &str);
}
