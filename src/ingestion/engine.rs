use super::acquire::SourceHandle;
use super::tokenizer::Tokenizer;
use super::types::IngestReport;
use crate::error::CountError;
use crate::storage::memory::WordCountStore;

use std::sync::Arc;
use tokio::io::BufReader;

/// Drives tokenizer output into the counter store, one run per source.
pub struct IngestionEngine {
    store: Arc<WordCountStore>,
}

impl IngestionEngine {
    pub fn new(store: Arc<WordCountStore>) -> Self {
        Self { store }
    }

    /// Counts every word in the source's stream.
    ///
    /// Words are upserted in stream order. The run is fail-fast: the first
    /// storage or stream error aborts it, and the increments applied up to
    /// that point stay durable. The source's reader is owned by the tokenizer
    /// and dropped (closed) whichever way this returns.
    pub async fn ingest(&self, source: SourceHandle) -> Result<IngestReport, CountError> {
        let origin = source.origin().to_string();
        let mut tokenizer = Tokenizer::new(BufReader::new(source.into_reader()));
        let mut words = 0u64;

        loop {
            match tokenizer.next_word().await {
                Ok(Some(word)) => {
                    tracing::debug!("Found word '{}' in {}", word, origin);
                    self.store
                        .increment(&word)
                        .map_err(|e| CountError::storage(&origin, e))?;
                    words += 1;
                }
                Ok(None) => break,
                Err(e) => return Err(CountError::ingestion(&origin, e)),
            }
        }

        tracing::info!("Counted {} words from {}", words, origin);
        Ok(IngestReport { words })
    }
}
