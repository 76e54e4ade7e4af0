//! Ingestion Module Tests
//!
//! ## Test Scopes
//! - **Tokenizer**: whitespace splitting, empty inputs, tokens crossing buffer
//!   refills, case preservation.
//! - **Acquirer**: file and URL validation failures, happy paths against the
//!   local filesystem and an in-process HTTP server.
//! - **Engine**: counts landing in the store, repeat ingestions, fail-fast
//!   behavior with partial counts preserved.
//! - **HTTP surface**: full request/response round-trips for the count and
//!   statistics endpoints.

#[cfg(test)]
mod tests {
    use crate::error::CountError;
    use crate::executor::controller::ExecutionController;
    use crate::executor::executor::IngestExecutor;
    use crate::executor::handlers::handle_run_status;
    use crate::executor::queue::RunQueue;
    use crate::ingestion::acquire::{ResourceAcquirer, SourceHandle, SourceKind};
    use crate::ingestion::engine::IngestionEngine;
    use crate::ingestion::handlers::handle_count;
    use crate::ingestion::tokenizer::Tokenizer;
    use crate::statistics::handlers::{handle_clear_statistics, handle_get_statistics};
    use crate::statistics::service::StatisticsService;
    use crate::storage::memory::WordCountStore;

    use axum::routing::{get, post};
    use axum::{Extension, Router};
    use std::io::Write;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::io::BufReader;

    fn source_from_bytes(bytes: &'static [u8], origin: &str) -> SourceHandle {
        SourceHandle::new(Box::new(bytes), origin, SourceKind::File)
    }

    async fn collect_words(input: &'static [u8]) -> Vec<String> {
        let mut tokenizer = Tokenizer::new(BufReader::new(input));
        let mut words = Vec::new();
        while let Some(word) = tokenizer.next_word().await.unwrap() {
            words.push(word);
        }
        words
    }

    // ============================================================
    // TOKENIZER
    // ============================================================

    #[tokio::test]
    async fn test_tokenizer_splits_on_whitespace() {
        let words = collect_words(b"Hello my name is").await;
        assert_eq!(words, vec!["Hello", "my", "name", "is"]);
    }

    #[tokio::test]
    async fn test_tokenizer_collapses_whitespace_runs() {
        let words = collect_words(b"  leading\t\tmiddle \r\n trailing   ").await;
        assert_eq!(words, vec!["leading", "middle", "trailing"]);
    }

    #[tokio::test]
    async fn test_tokenizer_empty_and_blank_inputs() {
        assert!(collect_words(b"").await.is_empty());
        assert!(collect_words(b"   \n\t  ").await.is_empty());
    }

    #[tokio::test]
    async fn test_tokenizer_preserves_case_and_punctuation() {
        // No normalization: tokens come out exactly as they appear
        let words = collect_words(b"Hello hello HELLO it's...").await;
        assert_eq!(words, vec!["Hello", "hello", "HELLO", "it's..."]);
    }

    #[tokio::test]
    async fn test_tokenizer_reassembles_words_across_buffer_refills() {
        // A 4-byte buffer forces every word to straddle at least one refill
        let input: &[u8] = b"alphabetical  battlements cartographer";
        let mut tokenizer = Tokenizer::new(BufReader::with_capacity(4, input));

        let mut words = Vec::new();
        while let Some(word) = tokenizer.next_word().await.unwrap() {
            words.push(word);
        }

        assert_eq!(
            words,
            vec!["alphabetical", "battlements", "cartographer"]
        );
    }

    #[tokio::test]
    async fn test_tokenizer_is_single_pass() {
        let input: &[u8] = b"one two";
        let mut tokenizer = Tokenizer::new(BufReader::new(input));

        assert_eq!(tokenizer.next_word().await.unwrap().unwrap(), "one");
        assert_eq!(tokenizer.next_word().await.unwrap().unwrap(), "two");
        assert_eq!(tokenizer.next_word().await.unwrap(), None);
        // Exhausted stays exhausted
        assert_eq!(tokenizer.next_word().await.unwrap(), None);
    }

    // ============================================================
    // ACQUIRER - FILE SOURCES
    // ============================================================

    #[tokio::test]
    async fn test_from_file_blank_path_is_bad_request() {
        let acquirer = ResourceAcquirer::new().unwrap();

        let err = acquirer.from_file("   ").await.unwrap_err();
        assert!(matches!(err, CountError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_from_file_missing_path_is_not_found() {
        let acquirer = ResourceAcquirer::new().unwrap();

        let err = acquirer
            .from_file("/nonexistent/words.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, CountError::NotFound(_)));
        assert!(err.to_string().contains("/nonexistent/words.txt"));
    }

    #[tokio::test]
    async fn test_from_file_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = ResourceAcquirer::new().unwrap();

        let err = acquirer
            .from_file(dir.path().to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, CountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_from_file_streams_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "alpha beta alpha").unwrap();
        file.flush().unwrap();

        let acquirer = ResourceAcquirer::new().unwrap();
        let source = acquirer
            .from_file(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(source.kind(), SourceKind::File);

        let store = Arc::new(WordCountStore::new());
        let engine = IngestionEngine::new(store.clone());
        let report = engine.ingest(source).await.unwrap();

        assert_eq!(report.words, 3);
        assert_eq!(store.get("alpha"), 2);
        assert_eq!(store.get("beta"), 1);
    }

    // ============================================================
    // ACQUIRER - URL SOURCES
    // ============================================================

    async fn spawn_content_server() -> SocketAddr {
        let app = Router::new().route("/words.txt", get(|| async { "Hello my name is" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_from_url_blank_is_bad_request() {
        let acquirer = ResourceAcquirer::new().unwrap();

        let err = acquirer.from_url("").await.unwrap_err();
        assert!(matches!(err, CountError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_from_url_malformed_is_bad_request() {
        let acquirer = ResourceAcquirer::new().unwrap();

        let err = acquirer.from_url("not a url").await.unwrap_err();
        assert!(matches!(err, CountError::BadRequest(_)));
        assert!(err.to_string().contains("not a url"));
    }

    #[tokio::test]
    async fn test_from_url_probe_non_2xx_is_not_found() {
        let addr = spawn_content_server().await;
        let acquirer = ResourceAcquirer::new().unwrap();

        let err = acquirer
            .from_url(&format!("http://{}/missing.txt", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, CountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_from_url_refused_connection_is_unreachable() {
        let acquirer = ResourceAcquirer::new().unwrap();

        // Port 1 is never serving HTTP
        let err = acquirer.from_url("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, CountError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn test_from_url_streams_remote_content() {
        let addr = spawn_content_server().await;
        let acquirer = ResourceAcquirer::new().unwrap();

        let source = acquirer
            .from_url(&format!("http://{}/words.txt", addr))
            .await
            .unwrap();
        assert_eq!(source.kind(), SourceKind::Url);

        let store = Arc::new(WordCountStore::new());
        let engine = IngestionEngine::new(store.clone());
        let report = engine.ingest(source).await.unwrap();

        assert_eq!(report.words, 4);
        assert_eq!(store.get("Hello"), 1);
        assert_eq!(store.get("is"), 1);
    }

    // ============================================================
    // ENGINE
    // ============================================================

    #[tokio::test]
    async fn test_engine_counts_each_word_occurrence() {
        let store = Arc::new(WordCountStore::new());
        let engine = IngestionEngine::new(store.clone());

        let report = engine
            .ingest(source_from_bytes(b"Hello my name is", "unit test"))
            .await
            .unwrap();

        assert_eq!(report.words, 4);
        assert_eq!(store.get("Hello"), 1);
        assert_eq!(store.get("my"), 1);
        assert_eq!(store.get("name"), 1);
        assert_eq!(store.get("is"), 1);
        assert_eq!(store.get("absent"), 0);
    }

    #[tokio::test]
    async fn test_engine_accumulates_across_runs() {
        let store = Arc::new(WordCountStore::new());
        let engine = IngestionEngine::new(store.clone());

        engine
            .ingest(source_from_bytes(b"Hello my name is", "first run"))
            .await
            .unwrap();
        engine
            .ingest(source_from_bytes(b"Hello", "second run"))
            .await
            .unwrap();

        assert_eq!(store.get("Hello"), 2);
        assert_eq!(store.get("my"), 1);
        assert_eq!(store.get("name"), 1);
        assert_eq!(store.get("is"), 1);
    }

    #[tokio::test]
    async fn test_engine_sequential_runs_reach_n() {
        let store = Arc::new(WordCountStore::new());
        let engine = IngestionEngine::new(store.clone());

        for _ in 0..10 {
            engine
                .ingest(source_from_bytes(b"repeated", "loop run"))
                .await
                .unwrap();
        }

        assert_eq!(store.get("repeated"), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_engine_concurrent_runs_lose_no_counts() {
        let store = Arc::new(WordCountStore::new());
        let engine = Arc::new(IngestionEngine::new(store.clone()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                engine
                    .ingest(source_from_bytes(b"shared unique", "parallel run"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("shared"), 16);
        assert_eq!(store.get("unique"), 16);
    }

    #[tokio::test]
    async fn test_engine_fail_fast_keeps_partial_counts() {
        use std::pin::Pin;
        use std::task::{Context, Poll};
        use tokio::io::{AsyncRead, ReadBuf};

        // Yields some words, then fails the stream
        struct FailingReader {
            payload: &'static [u8],
            sent: bool,
        }

        impl AsyncRead for FailingReader {
            fn poll_read(
                mut self: Pin<&mut Self>,
                _cx: &mut Context<'_>,
                buf: &mut ReadBuf<'_>,
            ) -> Poll<std::io::Result<()>> {
                if self.sent {
                    return Poll::Ready(Err(std::io::Error::new(
                        std::io::ErrorKind::ConnectionReset,
                        "stream interrupted",
                    )));
                }
                self.sent = true;
                buf.put_slice(self.payload);
                Poll::Ready(Ok(()))
            }
        }

        let store = Arc::new(WordCountStore::new());
        let engine = IngestionEngine::new(store.clone());

        let reader = FailingReader {
            payload: b"before after ",
            sent: false,
        };
        let source = SourceHandle::new(Box::new(reader), "flaky source", SourceKind::Url);

        let err = engine.ingest(source).await.unwrap_err();
        assert!(matches!(err, CountError::Ingestion { .. }));
        assert!(err.to_string().contains("flaky source"));

        // Increments applied before the failure are not rolled back
        assert_eq!(store.get("before"), 1);
        assert_eq!(store.get("after"), 1);
    }

    // ============================================================
    // HTTP SURFACE
    // ============================================================

    struct TestApp {
        addr: SocketAddr,
        store: Arc<WordCountStore>,
    }

    async fn spawn_app() -> TestApp {
        let store = Arc::new(WordCountStore::new());
        let acquirer = Arc::new(ResourceAcquirer::new().unwrap());
        let engine = Arc::new(IngestionEngine::new(store.clone()));
        let queue = Arc::new(RunQueue::new());
        let controller = Arc::new(ExecutionController::new(engine.clone(), queue.clone()));
        let statistics = Arc::new(StatisticsService::new(store.clone()));

        IngestExecutor::new(queue.clone(), engine, 2).start();

        let app = Router::new()
            .route("/api/v1/words/count", post(handle_count))
            .route("/api/v1/words/count/:run_id", get(handle_run_status))
            .route(
                "/api/v1/words/statistics/:word",
                get(handle_get_statistics).delete(handle_clear_statistics),
            )
            .layer(Extension(acquirer))
            .layer(Extension(controller))
            .layer(Extension(queue))
            .layer(Extension(statistics));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestApp { addr, store }
    }

    #[tokio::test]
    async fn test_count_endpoint_with_streamed_body() {
        let app = spawn_app().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("http://{}/api/v1/words/count", app.addr))
            .body("Hello my name is")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "completed");
        assert_eq!(body["words"], 4);

        assert_eq!(app.store.get("Hello"), 1);
        assert_eq!(app.store.get("name"), 1);
    }

    #[tokio::test]
    async fn test_count_endpoint_rejects_url_and_file_path_together() {
        let app = spawn_app().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("http://{}/api/v1/words/count", app.addr))
            .query(&[("url", "http://example.com"), ("filePath", "/tmp/x")])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_count_endpoint_missing_file_is_404() {
        let app = spawn_app().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("http://{}/api/v1/words/count", app.addr))
            .query(&[("filePath", "/nonexistent/words.txt")])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_count_endpoint_malformed_url_is_400() {
        let app = spawn_app().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("http://{}/api/v1/words/count", app.addr))
            .query(&[("url", "not a url")])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_count_endpoint_async_file_ingestion() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "deferred words deferred").unwrap();
        file.flush().unwrap();

        let app = spawn_app().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("http://{}/api/v1/words/count", app.addr))
            .query(&[
                ("filePath", file.path().to_str().unwrap()),
                ("async", "true"),
            ])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "scheduled");
        assert!(body["run_id"].is_string());

        // The fire-and-forget run still lands its counts
        for _ in 0..100 {
            if app.store.get("deferred") == 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        assert_eq!(app.store.get("deferred"), 2);
        assert_eq!(app.store.get("words"), 1);
    }

    #[tokio::test]
    async fn test_run_status_endpoint_tracks_async_run() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "status check").unwrap();
        file.flush().unwrap();

        let app = spawn_app().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("http://{}/api/v1/words/count", app.addr))
            .query(&[
                ("filePath", file.path().to_str().unwrap()),
                ("async", "true"),
            ])
            .send()
            .await
            .unwrap();
        let body: serde_json::Value = response.json().await.unwrap();
        let run_id = body["run_id"].as_str().unwrap().to_string();

        let mut status = serde_json::Value::Null;
        for _ in 0..100 {
            let response = client
                .get(format!("http://{}/api/v1/words/count/{}", app.addr, run_id))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::OK);
            let body: serde_json::Value = response.json().await.unwrap();
            status = body["status"].clone();
            if status.get("Completed").is_some() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        assert_eq!(status["Completed"]["words"], 2);
    }

    #[tokio::test]
    async fn test_run_status_endpoint_unknown_run_is_404() {
        let app = spawn_app().await;
        let client = reqwest::Client::new();

        let response = client
            .get(format!(
                "http://{}/api/v1/words/count/not-a-real-run",
                app.addr
            ))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_statistics_endpoints_round_trip() {
        let app = spawn_app().await;
        let client = reqwest::Client::new();

        client
            .post(format!("http://{}/api/v1/words/count", app.addr))
            .body("echo echo echo")
            .send()
            .await
            .unwrap();

        let response = client
            .get(format!("http://{}/api/v1/words/statistics/echo", app.addr))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["word"], "echo");
        assert_eq!(body["count"], 3);

        // Unknown words read as zero, not as an error
        let response = client
            .get(format!("http://{}/api/v1/words/statistics/silence", app.addr))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["count"], 0);

        // Clear, then read back zero
        let response = client
            .delete(format!("http://{}/api/v1/words/statistics/echo", app.addr))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(app.store.get("echo"), 0);
    }
}
