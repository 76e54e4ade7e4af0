//! Execution Mode Controller Module
//!
//! Decides where an ingestion run executes: on the caller's own control flow
//! (sync) or on the background worker pool (async).
//!
//! ## Architecture Overview
//! The async side follows a **pull-based** model:
//! 1. **Submission**: `ExecutionController::schedule` records the run as
//!    `Pending` in the `RunQueue` and returns a handle immediately.
//! 2. **Claim**: worker loops poll the queue and atomically flip a pending run
//!    to `Running`, taking exclusive ownership of its source stream.
//! 3. **Completion**: the worker records `Completed`/`Failed` in the registry,
//!    logs the outcome, and resolves the handle. A caller that discarded the
//!    handle (fire-and-forget) still gets the counts, the status record, and
//!    the error log.
//!
//! There is no cooperative cancellation: once a run is scheduled it executes
//! to completion or failure; declining to await the handle does not stop it.
//!
//! ## Submodules
//! - **`queue`**: run registry holding pending work plus the status of every
//!   tracked run.
//! - **`executor`**: the bounded worker pool driving pending runs.
//! - **`controller`**: the sync/async dispatch decision, including the
//!   request-body exemption.
//! - **`handlers`**: HTTP access to a run's recorded status.

pub mod controller;
pub mod executor;
pub mod handlers;
pub mod queue;
pub mod types;
