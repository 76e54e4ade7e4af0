use axum::routing::{get, post};
use axum::{Extension, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wordcount::executor::controller::ExecutionController;
use wordcount::executor::executor::IngestExecutor;
use wordcount::executor::handlers::handle_run_status;
use wordcount::executor::queue::RunQueue;
use wordcount::ingestion::acquire::ResourceAcquirer;
use wordcount::ingestion::engine::IngestionEngine;
use wordcount::ingestion::handlers::handle_count;
use wordcount::statistics::handlers::{handle_clear_statistics, handle_get_statistics};
use wordcount::statistics::service::StatisticsService;
use wordcount::storage::memory::WordCountStore;
use wordcount::system::handlers::{handle_coffee, handle_ping, handle_system_status};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = "0.0.0.0:8080".parse()?;
    let mut worker_count: usize = 4;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" if i + 1 < args.len() => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--workers" if i + 1 < args.len() => {
                worker_count = args[i + 1].parse()?;
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!("Usage: {} [--bind <addr:port>] [--workers <n>]", args[0]);
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    // 1. Shared counter state:
    let store = Arc::new(WordCountStore::new());

    // 2. Ingestion pipeline:
    let acquirer = Arc::new(ResourceAcquirer::new()?);
    let engine = Arc::new(IngestionEngine::new(store.clone()));

    // 3. Deferred-execution layer:
    let queue = Arc::new(RunQueue::new());
    let controller = Arc::new(ExecutionController::new(engine.clone(), queue.clone()));

    IngestExecutor::new(queue.clone(), engine, worker_count).start();

    // 4. Query layer:
    let statistics = Arc::new(StatisticsService::new(store.clone()));

    // 5. HTTP router:
    let app = Router::new()
        .route("/api/v1/words/count", post(handle_count))
        .route("/api/v1/words/count/:run_id", get(handle_run_status))
        .route(
            "/api/v1/words/statistics/:word",
            get(handle_get_statistics).delete(handle_clear_statistics),
        )
        .route("/api/v1/system/ping", get(handle_ping))
        .route("/api/v1/system/coffee", get(handle_coffee))
        .route("/api/v1/system/status", get(handle_system_status))
        .layer(Extension(store))
        .layer(Extension(acquirer))
        .layer(Extension(controller))
        .layer(Extension(queue))
        .layer(Extension(statistics));

    tracing::info!("Word count service listening on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
