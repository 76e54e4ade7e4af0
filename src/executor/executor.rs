//! Worker Pool Implementation
//!
//! Spawns the background workers that drive deferred ingestion runs. The pool
//! size is the bound on how many async runs execute in parallel; sync runs
//! never touch the pool.

use super::queue::RunQueue;
use crate::ingestion::engine::IngestionEngine;

use std::sync::Arc;
use std::time::Duration;

/// How long an idle worker sleeps between queue polls.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct IngestExecutor {
    queue: Arc<RunQueue>,
    engine: Arc<IngestionEngine>,
    worker_count: usize,
}

impl IngestExecutor {
    pub fn new(
        queue: Arc<RunQueue>,
        engine: Arc<IngestionEngine>,
        worker_count: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            queue,
            engine,
            worker_count,
        })
    }

    /// Spawns the worker loops and returns immediately.
    pub fn start(self: Arc<Self>) {
        tracing::info!("Starting {} ingestion workers", self.worker_count);

        for worker_id in 0..self.worker_count {
            let executor = self.clone();
            tokio::spawn(async move {
                executor.worker_loop(worker_id).await;
            });
        }
    }

    /// Claim → ingest → record, forever.
    async fn worker_loop(&self, worker_id: usize) {
        tracing::info!("Worker {} started", worker_id);

        loop {
            match self.queue.claim_next() {
                Some(run) => {
                    tracing::info!(
                        "Worker {} claimed ingestion run {} ({})",
                        worker_id,
                        run.run_id.0,
                        run.source.origin()
                    );

                    let result = self.engine.ingest(run.source).await;
                    self.queue.complete(&run.run_id, &result);

                    // A closed receiver means the caller went fire-and-forget;
                    // the queue has already recorded and logged the outcome.
                    if let Some(done) = run.done {
                        let _ = done.send(result);
                    }
                }
                None => {
                    tokio::time::sleep(IDLE_POLL_INTERVAL).await;
                }
            }
        }
    }
}
