//! Error types raised by the metadata core.

use thiserror::Error;

/// Failures that abort a whole metadata request.
///
/// Per-source problems never surface here; they are captured as
/// [`crate::domain::metadata::SourceResult::Failure`] instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A required setting (the upstream credential) is missing.
    #[error("{0}")]
    Configuration(String),
    /// The request parameters are malformed or out of policy.
    #[error("{0}")]
    Validation(String),
}

impl MetadataError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Failure of a single upstream fetch.
///
/// The `Display` text becomes the per-source failure reason in responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed payload: {0}")]
    Payload(String),
    #[error("timeout")]
    Timeout,
}
