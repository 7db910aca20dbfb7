use crate::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Classification Error: {message} {location}")]
    Classification {
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    /// The message without the location suffix, for on-page display.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation { message, .. } | ModelError::Classification { message, .. } => {
                message
            }
        }
    }
}
