use anyhow::Result;
use dashmap::DashMap;

/// Shared word → occurrence-count mapping.
///
/// Backed by a sharded concurrent map. Keys are the exact token strings as
/// produced by the tokenizer: case-sensitive, no normalization, never empty.
/// Write operations are `Result`-typed so a durable backend can be slotted in
/// behind the same contract.
pub struct WordCountStore {
    counters: DashMap<String, u64>,
}

impl WordCountStore {
    pub fn new() -> Self {
        Self {
            counters: DashMap::new(),
        }
    }

    /// Atomically increments the counter for `word`, creating it at 1 if absent.
    ///
    /// This is a single locked entry update. A `contains_key` check followed by
    /// an insert would let two concurrent runs both observe a missing key and
    /// silently drop one of the increments.
    pub fn increment(&self, word: &str) -> Result<u64> {
        let mut entry = self.counters.entry(word.to_string()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    /// Current count for `word`; 0 when the word has never been seen.
    pub fn get(&self, word: &str) -> u64 {
        self.counters
            .get(word)
            .map(|entry| *entry.value())
            .unwrap_or(0)
    }

    /// Removes the counter for `word` entirely. Clearing an absent word is a
    /// no-op, not an error; a subsequent `get` returns 0 either way.
    pub fn clear(&self, word: &str) -> Result<()> {
        self.counters.remove(word);
        Ok(())
    }

    /// Number of distinct words currently tracked.
    pub fn tracked_words(&self) -> usize {
        self.counters.len()
    }
}

impl Default for WordCountStore {
    fn default() -> Self {
        Self::new()
    }
}
