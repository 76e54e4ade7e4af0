//! Run Queue
//!
//! Registry of ingestion runs: the pending work the worker pool pulls from,
//! plus the recorded status of every run the service has tracked recently.
//!
//! ## Responsibilities
//! - **Submission**: registering a run as `Pending` and handing back the
//!   completion channel.
//! - **Claiming**: the atomic `Pending` → `Running` flip that gives exactly one
//!   worker ownership of the run's source stream.
//! - **Completion**: recording the terminal status and logging it, whether or
//!   not any caller is still holding the handle.

use super::types::{now_ms, RunHandle, RunId, RunSnapshot, RunStatus};
use crate::error::CountError;
use crate::ingestion::acquire::SourceHandle;
use crate::ingestion::types::IngestReport;

use dashmap::DashMap;
use tokio::sync::oneshot;

/// Terminal entries are pruned once the registry grows past this.
const MAX_TRACKED_RUNS: usize = 10_000;

struct RunEntry {
    origin: String,
    status: RunStatus,
    created_at: u64,
    /// Present until a worker claims the run.
    source: Option<SourceHandle>,
    /// Present until completion; absent send means the handle was discarded.
    done: Option<oneshot::Sender<Result<IngestReport, CountError>>>,
}

/// A run a worker has taken ownership of.
pub struct ClaimedRun {
    pub run_id: RunId,
    pub source: SourceHandle,
    pub done: Option<oneshot::Sender<Result<IngestReport, CountError>>>,
}

pub struct RunQueue {
    runs: DashMap<RunId, RunEntry>,
}

impl RunQueue {
    pub fn new() -> Self {
        Self {
            runs: DashMap::new(),
        }
    }

    /// Registers a deferred run and returns its id plus the caller's handle.
    pub fn submit(&self, source: SourceHandle) -> (RunId, RunHandle) {
        if self.runs.len() >= MAX_TRACKED_RUNS {
            self.runs.retain(|_, entry| !entry.status.is_terminal());
        }

        let run_id = RunId::new();
        let origin = source.origin().to_string();
        let (tx, rx) = oneshot::channel();

        self.runs.insert(
            run_id.clone(),
            RunEntry {
                origin: origin.clone(),
                status: RunStatus::Pending,
                created_at: now_ms(),
                source: Some(source),
                done: Some(tx),
            },
        );
        tracing::info!("Queued ingestion run {} for {}", run_id.0, origin);

        (
            run_id.clone(),
            RunHandle {
                run_id,
                origin,
                done: rx,
            },
        )
    }

    /// Claims the next pending run, if any.
    ///
    /// Candidate ids are collected first and the status flip happens under the
    /// entry's own lock, so two workers racing for the same run cannot both
    /// win it. The winner takes the source out of the entry, so the stream is
    /// owned by exactly one run of one worker.
    pub fn claim_next(&self) -> Option<ClaimedRun> {
        let pending: Vec<RunId> = self
            .runs
            .iter()
            .filter(|entry| entry.value().status == RunStatus::Pending)
            .map(|entry| entry.key().clone())
            .collect();

        for run_id in pending {
            if let Some(mut entry) = self.runs.get_mut(&run_id) {
                if entry.status != RunStatus::Pending {
                    continue;
                }
                let Some(source) = entry.source.take() else {
                    continue;
                };
                entry.status = RunStatus::Running;
                let done = entry.done.take();
                return Some(ClaimedRun {
                    run_id: run_id.clone(),
                    source,
                    done,
                });
            }
        }

        None
    }

    /// Records a run's terminal status and logs the outcome. Failures are
    /// logged here regardless of whether any caller observes the handle.
    pub fn complete(&self, run_id: &RunId, result: &Result<IngestReport, CountError>) {
        if let Some(mut entry) = self.runs.get_mut(run_id) {
            match result {
                Ok(report) => {
                    entry.status = RunStatus::Completed {
                        words: report.words,
                    };
                    tracing::info!(
                        "Ingestion run {} from {} completed ({} words)",
                        run_id.0,
                        entry.origin,
                        report.words
                    );
                }
                Err(e) => {
                    entry.status = RunStatus::Failed {
                        error: e.to_string(),
                    };
                    tracing::error!(
                        "Ingestion run {} from {} failed: {}",
                        run_id.0,
                        entry.origin,
                        e
                    );
                }
            }
        }
    }

    /// Point-in-time view of a tracked run.
    pub fn snapshot(&self, run_id: &RunId) -> Option<RunSnapshot> {
        self.runs.get(run_id).map(|entry| RunSnapshot {
            origin: entry.origin.clone(),
            status: entry.status.clone(),
            created_at: entry.created_at,
        })
    }

    /// (pending, running, completed, failed) counts across tracked runs.
    pub fn status_counts(&self) -> (usize, usize, usize, usize) {
        let mut pending = 0;
        let mut running = 0;
        let mut completed = 0;
        let mut failed = 0;

        for entry in self.runs.iter() {
            match entry.value().status {
                RunStatus::Pending => pending += 1,
                RunStatus::Running => running += 1,
                RunStatus::Completed { .. } => completed += 1,
                RunStatus::Failed { .. } => failed += 1,
            }
        }

        (pending, running, completed, failed)
    }
}

impl Default for RunQueue {
    fn default() -> Self {
        Self::new()
    }
}
