//! Tokenization and exact word counting

use std::collections::HashMap;

/// Split a raw batch into normalized tokens.
///
/// Pieces are separated by commas, trimmed and lowercased. Empty pieces are
/// dropped, so `" , ,"` yields nothing.
pub fn tokenize(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',').map(str::trim).filter(|piece| !piece.is_empty()).map(str::to_lowercase)
}

/// Exact word -> occurrence count mapping.
///
/// This is the source of truth the histogram and top-K views are derived
/// from. Counts only ever grow; the table shrinks only through [`clear`].
///
/// [`clear`]: FrequencyTable::clear
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    /// Map from word to occurrence count
    counts: HashMap<String, u64>,
    /// Total token occurrences since the last clear
    total: u64,
}

impl FrequencyTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `word`.
    ///
    /// Returns `(old_count, new_count)`; an `old_count` of 0 means the word
    /// was not present before.
    pub fn increment(&mut self, word: &str) -> (u64, u64) {
        self.total += 1;
        if let Some(count) = self.counts.get_mut(word) {
            let old = *count;
            *count += 1;
            return (old, *count);
        }
        self.counts.insert(word.to_string(), 1);
        (0, 1)
    }

    /// Get the count for a word, 0 when absent.
    pub fn count_of(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// All word counts, in no particular order.
    pub fn all_entries(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    /// Iterate over `(word, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Word counts sorted alphabetically by word.
    pub fn sorted_by_word(&self) -> Vec<(&str, u64)> {
        let mut items: Vec<_> = self.iter().collect();
        items.sort_unstable_by(|a, b| a.0.cmp(b.0));
        items
    }

    /// Total token occurrences recorded since the last clear.
    pub fn total_tokens(&self) -> u64 {
        self.total
    }

    /// Number of distinct words.
    pub fn distinct_words(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Drop every word and reset the running total.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }
}
