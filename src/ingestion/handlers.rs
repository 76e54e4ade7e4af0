use super::acquire::ResourceAcquirer;
use super::types::{CountParams, CountResponse};
use crate::error::CountError;
use crate::executor::controller::{ExecutionController, ScheduleOutcome};
use crate::executor::types::{ExecutionMode, IngestionTask};

use axum::body::Body;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

/// Counts word occurrences in the selected source.
///
/// The source is the raw request body unless a `url` or `filePath` query
/// parameter names one; supplying both is a client error. Acquisition failures
/// come back synchronously whatever the `async` flag says; only the counting
/// itself is deferred.
pub async fn handle_count(
    Extension(acquirer): Extension<Arc<ResourceAcquirer>>,
    Extension(controller): Extension<Arc<ExecutionController>>,
    Query(params): Query<CountParams>,
    body: Body,
) -> Result<(StatusCode, Json<CountResponse>), CountError> {
    if params.url.is_some() && params.file_path.is_some() {
        return Err(CountError::bad_request(
            "You can either specify a url or a file path, not both.",
        ));
    }

    let source = if let Some(url) = params.url.as_deref() {
        tracing::debug!("Got count request with url: '{}'", url);
        acquirer.from_url(url).await?
    } else if let Some(path) = params.file_path.as_deref() {
        tracing::debug!("Got count request with file path: '{}'", path);
        acquirer.from_file(path).await?
    } else {
        tracing::debug!("Got count request with streamed body");
        ResourceAcquirer::from_request_body(body)
    };

    let mode = if params.run_async {
        ExecutionMode::Async
    } else {
        ExecutionMode::Sync
    };

    match controller.schedule(IngestionTask { source, mode }).await? {
        ScheduleOutcome::Completed(report) => Ok((
            StatusCode::OK,
            Json(CountResponse {
                status: "completed".to_string(),
                words: Some(report.words),
                run_id: None,
            }),
        )),
        ScheduleOutcome::Deferred { run_id, .. } => Ok((
            StatusCode::ACCEPTED,
            Json(CountResponse {
                status: "scheduled".to_string(),
                words: None,
                run_id: Some(run_id.0),
            }),
        )),
    }
}
