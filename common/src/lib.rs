//! Shared building blocks for the scan portal client.
//!
//! This crate holds the small types every other layer leans on: error
//! location tracking, HTTP status categorization, and the redacted secret
//! wrapper used for passwords.
//!
//! ## Architecture
//!
//! - **common** (this crate): Cross-cutting primitives
//! - **models**: Pure view models exchanged with the service
//! - **client-core**: Controllers, page surfaces, and the HTTP client
//! - **skinscan**: Console front end wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_password;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_password::RedactedPassword;
