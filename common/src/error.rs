//! Error types shared by the client workflows.
//!
//! Every error here ends the current attempt and nothing else: the operator
//! sees the message and may trigger the action again.

use thiserror::Error;

use crate::model::category::Category;

/// The request never produced an HTTP response (network, DNS, abort, or the
/// request could not be built). Carries the underlying message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No files selected")]
    NothingToUpload,

    #[error("The {0} file has not been read yet")]
    MissingText(Category),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("HTTP error: {status}{}", body_suffix(.body))]
    Http { status: u16, body: String },

    #[error("HTTP error: {status} (invalid response){}", body_suffix(.body))]
    MalformedResponse { status: u16, body: String },

    /// The backend answered with `status != "success"`.
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignError {
    #[error("A model ID is required to send a campaign")]
    MissingModelId,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("HTTP error: {status}{}", body_suffix(.body))]
    Http { status: u16, body: String },

    #[error("HTTP error: {status} (invalid response){}", body_suffix(.body))]
    MalformedResponse { status: u16, body: String },

    /// The backend's `error` field.
    #[error("{0}")]
    Rejected(String),
}

/// A file could not be read during intake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not read the {category} file: {message}")]
pub struct IntakeError {
    pub category: Category,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown transport '{0}', expected 'json' or 'multipart'")]
    UnknownTransport(String),

    #[error("unknown CSV quoting '{0}', expected 'verbatim' or 'rfc4180'")]
    UnknownCsvQuoting(String),
}

fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}
