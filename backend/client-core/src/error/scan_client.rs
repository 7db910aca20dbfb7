use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Transport-level failures: the request never completed, or the body was
/// not the JSON the endpoint promises.
#[derive(Debug, ThisError)]
pub enum ScanClientError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("Decode Error: HTTP {status} - {message} {location}")]
    Decode {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    /// A page route answered with a status it should not.
    #[error("Status Error: HTTP {status} - {message} {location}")]
    Status {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Multipart Error: {message} {location}")]
    Multipart {
        message: String,
        location: ErrorLocation,
    },
}

impl ScanClientError {
    /// Failure description without the location suffix, for on-page display.
    pub fn description(&self) -> String {
        match self {
            ScanClientError::Decode {
                status, message, ..
            }
            | ScanClientError::Status {
                status, message, ..
            } => format!("HTTP {status} - {message}"),
            ScanClientError::Http { message, .. }
            | ScanClientError::UrlParse { message, .. }
            | ScanClientError::Multipart { message, .. } => message.clone(),
        }
    }
}

impl From<url::ParseError> for ScanClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ScanClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ScanClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ScanClientError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
