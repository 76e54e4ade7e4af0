//! Source Acquisition
//!
//! Validates a requested source and opens a readable byte stream over it.
//! Validation is deliberately cheap-first: blank/syntax checks happen before
//! any filesystem or network I/O, and the remote probe is bounded so a dead
//! endpoint cannot stall the request. The probe is a best-effort hint: a GET
//! may still behave differently than the HEAD that vouched for it.

use crate::error::CountError;

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

/// Bound on the reachability probe (connect and response).
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

pub type SourceReader = Box<dyn AsyncRead + Send + Unpin>;

/// Where a source came from. The request-body kind is special: its stream is
/// owned by the inbound transport call and must be consumed synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Url,
    Body,
}

/// An open, validated byte stream plus the origin description used in every
/// log and error message about it.
///
/// The handle exclusively owns its reader. Tokenization consumes the handle,
/// so the underlying file or connection is closed when the run finishes or
/// fails, on every exit path.
pub struct SourceHandle {
    // The reader is exclusively owned and only ever moved out via
    // `into_reader`, never shared. Wrapping it in a `Mutex` makes the handle
    // `Sync` (a `Mutex<T>` is `Sync` whenever `T: Send`), which the run queue
    // requires because it is shared across worker threads behind an `Arc`.
    reader: std::sync::Mutex<SourceReader>,
    origin: String,
    kind: SourceKind,
}

impl std::fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceHandle")
            .field("origin", &self.origin)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl SourceHandle {
    pub fn new(reader: SourceReader, origin: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            reader: std::sync::Mutex::new(reader),
            origin: origin.into(),
            kind,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn into_reader(self) -> SourceReader {
        self.reader
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Opens validated streams over files, URLs, and inbound request bodies.
pub struct ResourceAcquirer {
    http: reqwest::Client,
}

impl ResourceAcquirer {
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(PROBE_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    /// Opens a local file as a source.
    ///
    /// Fails with `BadRequest` on a blank path and `NotFound` when the path
    /// does not exist, is not a regular file, or cannot be opened.
    pub async fn from_file(&self, path: &str) -> Result<SourceHandle, CountError> {
        if path.trim().is_empty() {
            return Err(CountError::bad_request(
                "Got filePath query param but no value",
            ));
        }

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| CountError::not_found(format!("File '{}' doesn't exist.", path)))?;
        if !metadata.is_file() {
            return Err(CountError::not_found(format!(
                "File '{}' is not a regular file.",
                path
            )));
        }

        let file = tokio::fs::File::open(path).await.map_err(|e| {
            CountError::not_found(format!("File '{}' is not readable: {}", path, e))
        })?;

        Ok(SourceHandle::new(Box::new(file), path, SourceKind::File))
    }

    /// Probes and then retrieves a remote resource as a streaming source.
    ///
    /// Fails with `BadRequest` on a blank or malformed URL, `NotFound` when
    /// the probe answers outside 2xx, and `Unreachable` when the probe or the
    /// retrieval itself fails at the transport level.
    pub async fn from_url(&self, raw_url: &str) -> Result<SourceHandle, CountError> {
        if raw_url.trim().is_empty() {
            return Err(CountError::bad_request("Got url query param but no value"));
        }

        let url = reqwest::Url::parse(raw_url)
            .map_err(|e| CountError::bad_request(format!("Malformed URL: {}: {}", raw_url, e)))?;

        self.probe(&url).await?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CountError::unreachable(raw_url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CountError::not_found(format!(
                "GET '{}' returned {}",
                raw_url, status
            )));
        }

        let reader = reader_from_stream(response.bytes_stream());
        Ok(SourceHandle::new(reader, raw_url, SourceKind::Url))
    }

    /// Wraps an already-open inbound body stream. No validation beyond the
    /// type itself; the caller owns the transport that produced it.
    pub fn from_request_body(body: axum::body::Body) -> SourceHandle {
        let reader = reader_from_stream(body.into_data_stream());
        SourceHandle::new(reader, "incoming stream", SourceKind::Body)
    }

    /// HEAD-equivalent reachability check, bounded by `PROBE_TIMEOUT`.
    async fn probe(&self, url: &reqwest::Url) -> Result<(), CountError> {
        let response = self
            .http
            .head(url.clone())
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| CountError::unreachable(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CountError::not_found(format!(
                "Unable to reach remote address '{}': {}",
                url, status
            )));
        }
        Ok(())
    }
}

/// Bridges a fallible byte-chunk stream into the `AsyncRead` the tokenizer
/// consumes. Stream errors surface as read errors on the returned reader.
fn reader_from_stream<S, E>(stream: S) -> SourceReader
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let mapped = stream.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
    Box::new(StreamReader::new(Box::pin(mapped)))
}
