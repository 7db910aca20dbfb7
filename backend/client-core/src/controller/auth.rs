//! Login form controller.

use crate::controller::{FailureClass, ServerFailure};
use crate::controller::in_flight::InFlightGuard;
use crate::page::{Control, LoginNotice, MessageArea, Navigator};
use crate::scan_client::ScanClient;

use models::Credentials;

use std::sync::Arc;

use log::{info, warn};

pub const AUTHENTICATING_LABEL: &str = "AUTHENTICATING...";

/// Handles the login page hands to [`AuthController`].
#[derive(Clone)]
pub struct AuthSurfaces {
    pub submit: Arc<dyn Control>,
    pub message: Arc<dyn MessageArea>,
    pub navigator: Arc<dyn Navigator>,
}

#[derive(Debug)]
pub enum AuthEvent {
    Submit(Credentials),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Login accepted; the page is being replaced.
    Navigated(String),
    /// The server refused the credentials.
    Denied(String),
    /// The request failed or the reply was unreadable.
    ConnectionFailed(String),
    /// A previous submit was still in flight.
    Rejected,
}

impl AuthOutcome {
    pub fn failure(&self) -> Option<FailureClass> {
        match self {
            AuthOutcome::Denied(_) => Some(FailureClass::ServerReported(ServerFailure::Generic)),
            AuthOutcome::ConnectionFailed(_) => Some(FailureClass::Transport),
            AuthOutcome::Navigated(_) | AuthOutcome::Rejected => None,
        }
    }
}

pub struct AuthController {
    client: ScanClient,
    surfaces: AuthSurfaces,
    landing_path: String,
    in_flight: InFlightGuard,
}

impl AuthController {
    pub fn new(client: ScanClient, surfaces: AuthSurfaces, landing_path: impl Into<String>) -> Self {
        Self {
            client,
            surfaces,
            landing_path: landing_path.into(),
            in_flight: InFlightGuard::new(),
        }
    }

    pub async fn dispatch(&self, event: AuthEvent) -> AuthOutcome {
        match event {
            AuthEvent::Submit(credentials) => self.submit(credentials).await,
        }
    }

    /// Send the credentials and either navigate away or show why not.
    ///
    /// Navigation and label restoration are mutually exclusive: on success
    /// the busy label stays up because the page is unloading.
    pub async fn submit(&self, credentials: Credentials) -> AuthOutcome {
        let Some(_ticket) = self.in_flight.try_begin() else {
            warn!("Login submit ignored: previous attempt still in flight");
            return AuthOutcome::Rejected;
        };

        let submit = &self.surfaces.submit;
        let original_label = submit.label();
        submit.set_enabled(false);
        submit.set_label(AUTHENTICATING_LABEL);

        info!("Submitting login for user '{}'", credentials.username());

        match self.client.login(&credentials).await {
            Ok(response) if response.success => {
                info!("Login accepted, navigating to {}", self.landing_path);
                self.surfaces.navigator.navigate(&self.landing_path);
                AuthOutcome::Navigated(self.landing_path.clone())
            }
            Ok(response) => {
                let reason = response.reason().to_string();
                warn!("Login denied: {}", reason);
                self.restore(&original_label);
                self.surfaces
                    .message
                    .show(&LoginNotice::AccessDenied(reason.clone()));
                AuthOutcome::Denied(reason)
            }
            Err(e) => {
                warn!("Login request failed: {}", e);
                self.restore(&original_label);
                self.surfaces.message.show(&LoginNotice::ConnectionError);
                AuthOutcome::ConnectionFailed(e.description())
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    fn restore(&self, original_label: &str) {
        self.surfaces.submit.set_label(original_label);
        self.surfaces.submit.set_enabled(true);
    }
}
