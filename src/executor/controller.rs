//! Sync/Async Dispatch
//!
//! The single place that decides where an ingestion run executes. Source
//! acquisition has already happened by the time a task reaches `schedule`, so
//! acquisition errors always surface to the caller synchronously, whatever
//! execution mode was requested.

use super::queue::RunQueue;
use super::types::{ExecutionMode, IngestionTask, RunHandle, RunId};
use crate::error::CountError;
use crate::ingestion::acquire::SourceKind;
use crate::ingestion::engine::IngestionEngine;
use crate::ingestion::types::IngestReport;

use std::sync::Arc;

/// What `schedule` produced: a finished run, or a deferred one.
pub enum ScheduleOutcome {
    /// The run executed on the caller's control flow and finished.
    Completed(IngestReport),
    /// The run was queued; the caller may await the handle or drop it.
    Deferred { run_id: RunId, handle: RunHandle },
}

pub struct ExecutionController {
    engine: Arc<IngestionEngine>,
    queue: Arc<RunQueue>,
}

impl ExecutionController {
    pub fn new(engine: Arc<IngestionEngine>, queue: Arc<RunQueue>) -> Self {
        Self { engine, queue }
    }

    /// Executes or defers the task according to its mode.
    ///
    /// A request-body source always runs synchronously: its stream is owned by
    /// the inbound transport call and cannot outlive it. An `async` request
    /// for such a source is downgraded, not rejected.
    pub async fn schedule(&self, task: IngestionTask) -> Result<ScheduleOutcome, CountError> {
        let mode = if task.mode == ExecutionMode::Async
            && task.source.kind() == SourceKind::Body
        {
            tracing::warn!(
                "Async execution requested for {}; request-body sources run synchronously",
                task.source.origin()
            );
            ExecutionMode::Sync
        } else {
            task.mode
        };

        match mode {
            ExecutionMode::Sync => {
                let report = self.engine.ingest(task.source).await?;
                Ok(ScheduleOutcome::Completed(report))
            }
            ExecutionMode::Async => {
                let (run_id, handle) = self.queue.submit(task.source);
                Ok(ScheduleOutcome::Deferred { run_id, handle })
            }
        }
    }
}
