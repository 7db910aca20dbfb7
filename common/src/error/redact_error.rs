use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when a secret wrapper is handed to a serializer without opting in.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Refused to serialize {type_name}: write it with as_str() {location}")]
    ImplicitSerialization {
        type_name: &'static str,
        location: ErrorLocation,
    },
}
