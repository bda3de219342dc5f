//! Incrementally maintained top-K word ranking

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use super::tokens::FrequencyTable;

/// Number of ranked words tracked unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 5;

/// A word together with its frequency at the time it was ranked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RankedWord {
    pub word: String,
    pub frequency: u64,
}

impl RankedWord {
    pub fn new(word: impl Into<String>, frequency: u64) -> Self {
        Self { word: word.into(), frequency }
    }
}

impl fmt::Display for RankedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.word, self.frequency)
    }
}

/// Ranking order: higher frequency first, then alphabetical.
pub fn rank_order(a: &RankedWord, b: &RankedWord) -> Ordering {
    b.frequency.cmp(&a.frequency).then_with(|| a.word.cmp(&b.word))
}

/// Rank the whole vocabulary and keep the best `k` words.
pub fn full_ranking(table: &FrequencyTable, k: usize) -> Vec<RankedWord> {
    if k == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<_> =
        table.iter().map(|(word, frequency)| RankedWord::new(word, frequency)).collect();
    if ranked.len() > k {
        ranked.select_nth_unstable_by(k - 1, rank_order);
        ranked.truncate(k);
    }
    ranked.sort_unstable_by(rank_order);
    ranked
}

/// Holds the current best `capacity` words in rank order.
#[derive(Debug, Clone)]
pub struct TopKTracker {
    capacity: usize,
    entries: Vec<RankedWord>,
}

impl Default for TopKTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl TopKTracker {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: Vec::with_capacity(capacity) }
    }

    /// Bring the ranking up to date after the words in `changed` moved.
    ///
    /// An empty tracker is filled by ranking the full vocabulary. Otherwise
    /// only the changed words are considered: each one that would beat the
    /// current last entry replaces its own stale entry (if any), and the
    /// list is re-sorted and cut back to capacity. Frequencies never drop,
    /// so untouched words can never overtake the tracked ones.
    pub fn reconcile(&mut self, changed: &HashSet<String>, table: &FrequencyTable) {
        let mut working = std::mem::take(&mut self.entries);

        if working.is_empty() {
            tracing::trace!(vocabulary = table.distinct_words(), "rebuilding top-k from scratch");
            self.entries = full_ranking(table, self.capacity);
            return;
        }

        let mut changed: Vec<&str> = changed.iter().map(String::as_str).collect();
        changed.sort_unstable();

        for word in changed {
            let frequency = table.count_of(word);
            if frequency == 0 || !self.qualifies(&working, word, frequency) {
                continue;
            }
            working.retain(|entry| entry.word != word);
            working.push(RankedWord::new(word, frequency));
            working.sort_unstable_by(rank_order);
            working.truncate(self.capacity);
        }

        self.entries = working;
    }

    fn qualifies(&self, working: &[RankedWord], word: &str, frequency: u64) -> bool {
        if working.len() < self.capacity {
            return true;
        }
        match working.last() {
            Some(kth) => {
                frequency > kth.frequency
                    || (frequency == kth.frequency && word < kth.word.as_str())
            }
            None => self.capacity > 0,
        }
    }

    /// Tracked words, best first.
    pub fn snapshot(&self) -> Vec<RankedWord> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[RankedWord] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
