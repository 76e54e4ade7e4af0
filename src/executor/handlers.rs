use super::queue::RunQueue;
use super::types::{RunId, RunStatus};
use crate::error::CountError;

use axum::extract::Path;
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct RunStatusResponse {
    pub run_id: RunId,
    pub origin: String,
    pub status: RunStatus,
    pub created_at: u64,
}

pub async fn handle_run_status(
    Extension(queue): Extension<Arc<RunQueue>>,
    Path(run_id): Path<String>,
) -> Result<Json<RunStatusResponse>, CountError> {
    let run_id = RunId(run_id);

    match queue.snapshot(&run_id) {
        Some(snapshot) => Ok(Json(RunStatusResponse {
            run_id,
            origin: snapshot.origin,
            status: snapshot.status,
            created_at: snapshot.created_at,
        })),
        None => Err(CountError::not_found(format!(
            "No ingestion run with id '{}'",
            run_id.0
        ))),
    }
}
