//! Client-side view models for the scan portal.
//!
//! Everything here is transient: built from a form or a response, handed to a
//! controller or a page surface, then dropped. Nothing is persisted locally
//! and no model is shared between controllers.

pub mod action_response;
pub mod analysis;
pub mod credentials;
pub mod error;
pub mod history;
pub mod selected_file;
pub mod signup;

#[cfg(test)]
mod tests;

pub use action_response::ActionResponse;
pub use analysis::{AnalysisResponse, FormattedAnalysis, RawAnalysisResponse};
pub use common::ErrorLocation;
pub use credentials::{Credentials, CredentialsBuilder};
pub use error::model_error::ModelError;
pub use history::{HistoryCard, HistoryRecord};
pub use selected_file::SelectedFile;
pub use signup::{SignupForm, SignupReply};
