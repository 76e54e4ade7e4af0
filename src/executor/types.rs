use crate::error::CountError;
use crate::ingestion::acquire::SourceHandle;
use crate::ingestion::types::IngestReport;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Unique identifier for an ingestion run.
///
/// Wrapper around a UUID string; returned to async callers so they can look
/// the run's status up later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle state of a tracked ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RunStatus {
    /// Submitted but not yet picked up by a worker.
    Pending,
    /// A worker owns the run and is consuming its source.
    Running,
    /// Finished successfully; `words` occurrences were counted.
    Completed { words: u64 },
    /// The run aborted. Increments applied before the failure stay in place.
    Failed { error: String },
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }
}

/// How the caller asked an ingestion run to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run on the caller's control flow; return only once complete or failed.
    Sync,
    /// Hand to the worker pool; return a handle immediately.
    Async,
}

/// A scheduled unit of work: one source, one requested execution mode.
pub struct IngestionTask {
    pub source: SourceHandle,
    pub mode: ExecutionMode,
}

/// Completion handle for a deferred run.
///
/// Awaiting it yields the same success or failure the equivalent sync call
/// would have produced. Dropping it instead is fire-and-forget: the run still
/// executes and its outcome is still recorded and logged.
pub struct RunHandle {
    pub run_id: RunId,
    pub(crate) origin: String,
    pub(crate) done: oneshot::Receiver<Result<IngestReport, CountError>>,
}

impl RunHandle {
    pub async fn wait(self) -> Result<IngestReport, CountError> {
        match self.done.await {
            Ok(result) => result,
            Err(_) => Err(CountError::ingestion(
                &self.origin,
                "ingestion run was dropped before completing",
            )),
        }
    }
}

/// Point-in-time view of a tracked run, for status queries.
#[derive(Debug, Clone, Serialize)]
pub struct RunSnapshot {
    pub origin: String,
    pub status: RunStatus,
    pub created_at: u64,
}

/// Helper to get the current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
