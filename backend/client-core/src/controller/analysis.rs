//! Analysis form controller: file preview and upload.

use crate::controller::in_flight::InFlightGuard;
use crate::controller::{FailureClass, ServerFailure};
use crate::page::{AnalysisView, Control, FileInput, PreviewArea, ResultArea};
use crate::preview::ImagePreview;
use crate::scan_client::ScanClient;

use models::{AnalysisResponse, FormattedAnalysis, SelectedFile};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};

#[derive(Clone)]
pub struct AnalysisSurfaces {
    pub file_input: Arc<dyn FileInput>,
    pub preview: Arc<dyn PreviewArea>,
    pub result: Arc<dyn ResultArea>,
    pub submit: Arc<dyn Control>,
}

#[derive(Debug)]
pub enum AnalysisEvent {
    /// The picker changed; `None` when the selection was cancelled.
    FileSelected(Option<SelectedFile>),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Previewed,
    /// Selection cancelled; nothing changed.
    NoFile,
    MissingFile,
    MultipleFiles(usize),
    Completed(FormattedAnalysis),
    Blocked(String),
    ServerError(String),
    TransportFailed(String),
    /// A newer file selection replaced the one this response belongs to.
    Superseded,
    /// A previous submit was still in flight.
    Rejected,
}

impl AnalysisOutcome {
    pub fn failure(&self) -> Option<FailureClass> {
        match self {
            AnalysisOutcome::MissingFile | AnalysisOutcome::MultipleFiles(_) => {
                Some(FailureClass::ClientValidation)
            }
            AnalysisOutcome::Blocked(_) => {
                Some(FailureClass::ServerReported(ServerFailure::ContentBlocked))
            }
            AnalysisOutcome::ServerError(_) => {
                Some(FailureClass::ServerReported(ServerFailure::Generic))
            }
            AnalysisOutcome::TransportFailed(_) => Some(FailureClass::Transport),
            AnalysisOutcome::Previewed
            | AnalysisOutcome::NoFile
            | AnalysisOutcome::Completed(_)
            | AnalysisOutcome::Superseded
            | AnalysisOutcome::Rejected => None,
        }
    }
}

pub struct AnalysisController {
    client: ScanClient,
    surfaces: AnalysisSurfaces,
    history_path: String,
    in_flight: InFlightGuard,
    /// Advanced on every file selection; responses from an older epoch are dropped.
    epoch: AtomicU64,
}

impl AnalysisController {
    pub fn new(
        client: ScanClient,
        surfaces: AnalysisSurfaces,
        history_path: impl Into<String>,
    ) -> Self {
        Self {
            client,
            surfaces,
            history_path: history_path.into(),
            in_flight: InFlightGuard::new(),
            epoch: AtomicU64::new(0),
        }
    }

    pub async fn dispatch(&self, event: AnalysisEvent) -> AnalysisOutcome {
        match event {
            AnalysisEvent::FileSelected(file) => self.on_file_selected(file.as_ref()),
            AnalysisEvent::Submit => self.submit().await,
        }
    }

    /// Show a local preview and reset the result box. No network traffic.
    pub fn on_file_selected(&self, file: Option<&SelectedFile>) -> AnalysisOutcome {
        let Some(file) = file else {
            debug!("File selection cancelled");
            return AnalysisOutcome::NoFile;
        };

        self.epoch.fetch_add(1, Ordering::SeqCst);
        let preview = ImagePreview::from_file(file);
        debug!(
            "Previewing {} ({}, {} bytes)",
            file.file_name,
            file.mime_type,
            file.len()
        );

        self.surfaces.preview.show(&preview);
        self.surfaces.result.render(&AnalysisView::Ready);
        AnalysisOutcome::Previewed
    }

    /// Upload the selected file and render the classified response.
    pub async fn submit(&self) -> AnalysisOutcome {
        let Some(_ticket) = self.in_flight.try_begin() else {
            warn!("Analysis submit ignored: previous upload still in flight");
            return AnalysisOutcome::Rejected;
        };

        let mut selected = self.surfaces.file_input.selected();
        let file = match selected.len() {
            0 => {
                self.surfaces.result.render(&AnalysisView::MissingFile);
                return AnalysisOutcome::MissingFile;
            }
            1 => selected.remove(0),
            count => {
                self.surfaces
                    .result
                    .render(&AnalysisView::MultipleFiles(count));
                return AnalysisOutcome::MultipleFiles(count);
            }
        };

        let epoch = self.epoch.load(Ordering::SeqCst);
        self.surfaces.submit.set_enabled(false);
        self.surfaces.result.render(&AnalysisView::Busy);

        info!("Uploading {} for analysis", file.file_name);
        let result = self.client.analyze(&file).await;

        self.surfaces.submit.set_enabled(true);

        if self.epoch.load(Ordering::SeqCst) != epoch {
            info!(
                "Discarding analysis of {}: a newer file was selected",
                file.file_name
            );
            return AnalysisOutcome::Superseded;
        }

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Analysis request failed: {}", e);
                let description = e.description();
                self.surfaces
                    .result
                    .render(&AnalysisView::NetworkError(description.clone()));
                return AnalysisOutcome::TransportFailed(description);
            }
        };

        match AnalysisResponse::classify(raw) {
            Ok(AnalysisResponse::Success { analysis }) => {
                let formatted = FormattedAnalysis::from_text(&analysis);
                info!(
                    "Analysis complete for {} ({} lines)",
                    file.file_name,
                    formatted.lines().len()
                );
                self.surfaces.result.render(&AnalysisView::Complete {
                    analysis: formatted.clone(),
                    history_path: self.history_path.clone(),
                });
                // Preview stays up; a repeat needs a fresh selection.
                self.surfaces.file_input.clear();
                AnalysisOutcome::Completed(formatted)
            }
            Ok(AnalysisResponse::Blocked { message }) => {
                warn!("Analysis blocked by content filter: {}", message);
                self.surfaces.result.render(&AnalysisView::Blocked);
                AnalysisOutcome::Blocked(message)
            }
            Ok(AnalysisResponse::Generic { message }) => {
                warn!("Analysis failed server-side: {}", message);
                self.surfaces
                    .result
                    .render(&AnalysisView::SystemError(message.clone()));
                AnalysisOutcome::ServerError(message)
            }
            Err(e) => {
                warn!("Unrecognized analysis response: {}", e);
                let description = e.message().to_string();
                self.surfaces
                    .result
                    .render(&AnalysisView::NetworkError(description.clone()));
                AnalysisOutcome::TransportFailed(description)
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }
}
