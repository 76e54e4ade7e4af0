//! Service Error Taxonomy
//!
//! Every failure surfaced by the counting pipeline falls into one of these
//! variants. Acquisition-time errors (`BadRequest`, `NotFound`, `Unreachable`)
//! reach the caller before any ingestion starts; `Storage` and `Ingestion`
//! abort a run that is already underway without rolling back the increments
//! applied so far.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountError {
    /// Malformed, missing, or ambiguous input (blank path, malformed URL,
    /// both url and filePath supplied).
    #[error("{0}")]
    BadRequest(String),

    /// The file does not exist, or the remote probe answered outside 2xx.
    #[error("{0}")]
    NotFound(String),

    /// Network or transport failure while validating a remote resource.
    #[error("Unable to reach remote address '{resource}': {reason}")]
    Unreachable { resource: String, reason: String },

    /// A counter upsert or delete failed at the durable layer.
    #[error("Storage failure while counting from '{resource}': {reason}")]
    Storage { resource: String, reason: String },

    /// The source stream failed mid-run, after acquisition succeeded.
    #[error("Failed to count words from '{resource}': {reason}")]
    Ingestion { resource: String, reason: String },
}

impl CountError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unreachable(resource: &str, reason: impl ToString) -> Self {
        Self::Unreachable {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn storage(resource: &str, reason: impl ToString) -> Self {
        Self::Storage {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn ingestion(resource: &str, reason: impl ToString) -> Self {
        Self::Ingestion {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status this error maps to. `Unreachable` is a client-side problem
    /// (the supplied address cannot be validated), so it stays in the 400 range.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Unreachable { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage { .. } | Self::Ingestion { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CountError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        (self.status_code(), self.to_string()).into_response()
    }
}
