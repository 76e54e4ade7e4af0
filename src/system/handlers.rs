use crate::executor::queue::RunQueue;
use crate::storage::memory::WordCountStore;

use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

/// Liveness check.
pub async fn handle_ping() -> &'static str {
    tracing::info!("Got ping request");
    "PONG\n"
}

/// A small easter egg, because why not
pub async fn handle_coffee() -> (StatusCode, &'static str) {
    (
        StatusCode::IM_A_TEAPOT,
        concat!(
            "I'm sorry, I can't brew you coffee, I'm a teapot! \n",
            "                       (        \n",
            "            _           ) )     \n",
            "         _,(_)._        ((      \n",
            "    ___,(_______).        )     \n",
            "  ,'__.   /       \\    /\\_    \n",
            " /,' /  |\"\"|       \\  /  /   \n",
            "| | |   |__|       |,'  /       \n",
            " \\`.|                  /       \n",
            "  `. :           :    /         \n",
            "    `.            :.,'          \n",
            "      `-.________,-'            \n",
        ),
    )
}

#[derive(Debug, Serialize)]
pub struct SystemStatusResponse {
    pub tracked_words: usize,
    pub runs_pending: usize,
    pub runs_running: usize,
    pub runs_completed: usize,
    pub runs_failed: usize,
}

/// Counter and run-registry totals for quick operational checks.
pub async fn handle_system_status(
    Extension(store): Extension<Arc<WordCountStore>>,
    Extension(queue): Extension<Arc<RunQueue>>,
) -> Json<SystemStatusResponse> {
    let (pending, running, completed, failed) = queue.status_counts();
    Json(SystemStatusResponse {
        tracked_words: store.tracked_words(),
        runs_pending: pending,
        runs_running: running,
        runs_completed: completed,
        runs_failed: failed,
    })
}
