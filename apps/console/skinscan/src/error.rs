use client_core::error::CoreError;
use client_core::error::config::ConfigError;
use client_core::error::scan_client::ScanClientError;

use common::ErrorLocation;
use models::ModelError;

use std::panic::Location;

use thiserror::Error;

/// Errors surfaced by the console front end.
///
/// Controller failures never appear here: they are rendered on the console
/// page. These cover startup, input parsing, and terminal I/O.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Error from this app
    #[error("Console Error: {message} {location}")]
    Console {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core (configuration, HTTP client construction)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// A command line the session could not understand
    #[error("Input Error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },
}

impl ConsoleError {
    #[track_caller]
    pub fn input(message: impl Into<String>) -> Self {
        ConsoleError::Input {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The message without the location suffix, for printing to the user.
    pub fn message(&self) -> &str {
        match self {
            ConsoleError::Console { message, .. }
            | ConsoleError::Core { message, .. }
            | ConsoleError::Input { message, .. } => message,
        }
    }
}

impl From<CoreError> for ConsoleError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        ConsoleError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for ConsoleError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        ConsoleError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ScanClientError> for ConsoleError {
    #[track_caller]
    fn from(error: ScanClientError) -> Self {
        ConsoleError::Core {
            message: error.description(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for ConsoleError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ConsoleError::Input {
            message: error.message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
