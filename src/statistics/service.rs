use crate::error::CountError;
use crate::storage::memory::WordCountStore;

use std::sync::Arc;

/// Thin query layer over the shared counter store.
pub struct StatisticsService {
    store: Arc<WordCountStore>,
}

impl StatisticsService {
    pub fn new(store: Arc<WordCountStore>) -> Self {
        Self { store }
    }

    /// How many times `word` has appeared across all ingested input so far.
    /// 0 for a word that was never seen; never an error.
    pub fn word_count(&self, word: &str) -> u64 {
        self.store.get(word)
    }

    /// Removes the counter for `word`. Idempotent.
    pub fn clear_word(&self, word: &str) -> Result<(), CountError> {
        tracing::info!("Clearing counter for word {}", word);
        self.store
            .clear(word)
            .map_err(|e| CountError::storage(word, e))
    }
}
