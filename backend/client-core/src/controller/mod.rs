//! Controllers binding page surfaces to service calls.
//!
//! Each controller owns one page's workflow and shares nothing mutable with
//! the others. A page declares what it contains by supplying surface groups;
//! [`Controllers::bind`] builds exactly the controllers those groups call for.
//!
//! # Overlap contract
//!
//! - Login and analysis submits reject a second attempt while one is in flight.
//! - History deletes are serialized per record id only.
//! - An analysis response that arrives after a newer file selection is dropped.

pub mod analysis;
pub mod auth;
pub mod history;
pub mod in_flight;

pub use analysis::{AnalysisController, AnalysisEvent, AnalysisOutcome, AnalysisSurfaces};
pub use auth::{AuthController, AuthEvent, AuthOutcome, AuthSurfaces};
pub use history::{
    DeleteOutcome, HistoryController, HistoryEvent, HistoryLayout, HistoryOutcome,
    HistorySurfaces, LoadOutcome,
};

use crate::config::AppConfig;
use crate::scan_client::ScanClient;

use log::info;

/// Where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Caught before any request was made.
    ClientValidation,
    /// The request failed or the reply could not be decoded.
    Transport,
    /// A well-formed reply reporting failure.
    ServerReported(ServerFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerFailure {
    ContentBlocked,
    Generic,
}

/// Surface groups present on the current page. A `None` group is a missing
/// page marker.
#[derive(Clone, Default)]
pub struct PageSurfaces {
    pub auth: Option<AuthSurfaces>,
    pub analysis: Option<AnalysisSurfaces>,
    pub history: Option<HistorySurfaces>,
}

/// The controllers bound to one page.
#[derive(Default)]
pub struct Controllers {
    pub auth: Option<AuthController>,
    pub analysis: Option<AnalysisController>,
    pub history: Option<HistoryController>,
}

impl Controllers {
    pub fn bind(client: &ScanClient, config: &AppConfig, surfaces: PageSurfaces) -> Self {
        let auth = surfaces.auth.map(|surfaces| {
            AuthController::new(client.clone(), surfaces, &config.routes.landing_path)
        });

        let analysis = surfaces.analysis.map(|surfaces| {
            AnalysisController::new(client.clone(), surfaces, &config.routes.history_path)
        });

        let history = surfaces.history.map(|surfaces| {
            HistoryController::new(
                client.clone(),
                surfaces,
                HistoryLayout {
                    static_prefix: config.routes.static_prefix.clone(),
                    excerpt_chars: config.ui.excerpt_chars,
                    card_removal_delay: config.ui.card_removal_delay(),
                },
            )
        });

        info!(
            "Bound controllers: auth={}, analysis={}, history={}",
            auth.is_some(),
            analysis.is_some(),
            history.is_some()
        );

        Self {
            auth,
            analysis,
            history,
        }
    }

    /// Page-load work: the history list is fetched once if the page has a grid.
    pub async fn initialize(&self) -> Option<LoadOutcome> {
        match &self.history {
            Some(history) => Some(history.load().await),
            None => None,
        }
    }
}
