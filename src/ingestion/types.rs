//! Ingestion Data Types
//!
//! DTOs for the counting endpoint plus the report a finished run produces.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by the count endpoint. Exactly one of
/// {request body, `url`, `filePath`} is the source; `async` defers execution
/// for the url and file sources.
#[derive(Debug, Deserialize)]
pub struct CountParams {
    pub url: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "async", default)]
    pub run_async: bool,
}

/// Outcome of a completed (or scheduled) counting request.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

/// What a single ingestion run accomplished.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IngestReport {
    /// Total word occurrences counted (not distinct words).
    pub words: u64,
}
