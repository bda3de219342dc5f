//! Batch ingestion and queries over the frequency index

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::config::AnalyzerConfig;

use super::error::InvariantViolation;
use super::histogram::{FrequencyBucket, RankHistogram};
use super::tokens::{tokenize, FrequencyTable};
use super::top_k::{full_ranking, RankedWord, TopKTracker, DEFAULT_TOP_K};

/// Whether any word has been ingested since construction or the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerState {
    Empty,
    Populated,
}

/// What a single `ingest` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Tokens processed after normalization
    pub tokens: usize,
    /// Words seen for the first time
    pub new_words: usize,
    /// Distinct words whose frequency changed
    pub changed_words: usize,
}

/// Incremental word-frequency index.
///
/// Owns the exact counts plus two derived views that are kept current after
/// every batch: the distinct-frequency histogram and the top-K ranking. The
/// three only change together, through [`ingest`] and [`reset`].
///
/// [`ingest`]: Analyzer::ingest
/// [`reset`]: Analyzer::reset
#[derive(Debug, Clone)]
pub struct Analyzer {
    table: FrequencyTable,
    histogram: RankHistogram,
    top_k: TopKTracker,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer tracking the default top 5 words.
    pub fn new() -> Self {
        Self::with_top_k(DEFAULT_TOP_K)
    }

    /// Create an analyzer tracking the top `k` words.
    pub fn with_top_k(k: usize) -> Self {
        Self {
            table: FrequencyTable::new(),
            histogram: RankHistogram::new(),
            top_k: TopKTracker::new(k.max(1)),
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::with_top_k(config.top_k)
    }

    /// Ingest one comma-separated batch of words.
    ///
    /// Blank input is a no-op. The batch's old -> new frequency transitions
    /// are folded into one delta per frequency before touching the
    /// histogram, and only the words seen in this batch are offered to the
    /// top-K tracker.
    ///
    /// A histogram inconsistency does not abort the batch: it is logged, the
    /// remaining updates are applied, and the first violation is returned.
    pub fn ingest(&mut self, raw: &str) -> Result<IngestSummary, InvariantViolation> {
        let mut summary = IngestSummary::default();
        let mut deltas: HashMap<u64, i64> = HashMap::new();
        let mut changed: HashSet<String> = HashSet::new();

        for token in tokenize(raw) {
            let (old, new) = self.table.increment(&token);
            summary.tokens += 1;
            if old > 0 {
                *deltas.entry(old).or_insert(0) -= 1;
            } else {
                summary.new_words += 1;
            }
            *deltas.entry(new).or_insert(0) += 1;
            if old != new {
                changed.insert(token);
            }
        }

        if summary.tokens == 0 {
            return Ok(summary);
        }
        summary.changed_words = changed.len();

        let mut deltas: Vec<_> = deltas.into_iter().collect();
        deltas.sort_unstable();

        let mut first_violation = None;
        for (frequency, delta) in deltas {
            if let Err(violation) = self.histogram.apply_delta(frequency, delta) {
                tracing::warn!(%violation, "frequency histogram out of sync");
                first_violation.get_or_insert(violation);
            }
        }

        self.top_k.reconcile(&changed, &self.table);

        tracing::debug!(
            tokens = summary.tokens,
            new_words = summary.new_words,
            changed_words = summary.changed_words,
            "ingested batch"
        );

        match first_violation {
            Some(violation) => Err(violation),
            None => Ok(summary),
        }
    }

    /// Drop every word, returning to the empty state.
    pub fn reset(&mut self) {
        self.table.clear();
        self.histogram.clear();
        self.top_k.clear();
        tracing::info!("analyzer reset");
    }

    /// Best-ranked words, highest frequency first, ties alphabetical.
    pub fn top_k(&self) -> Vec<RankedWord> {
        self.top_k.snapshot()
    }

    /// Smallest frequency held by any word, 0 when empty.
    pub fn lowest_frequency(&self) -> u64 {
        self.histogram.lowest_active_frequency()
    }

    /// Largest frequency held by any word, 0 when empty.
    pub fn highest_frequency(&self) -> u64 {
        self.histogram.highest_active_frequency()
    }

    /// Number of words currently held in the top-K list.
    pub fn tracked_words(&self) -> usize {
        self.top_k.len()
    }

    /// Median over one frequency value per distinct word, 0.0 when empty.
    pub fn median_frequency(&self) -> f64 {
        let mut frequencies: Vec<u64> = self.table.iter().map(|(_, count)| count).collect();
        if frequencies.is_empty() {
            return 0.0;
        }
        frequencies.sort_unstable();

        let mid = frequencies.len() / 2;
        if frequencies.len() % 2 == 0 {
            (frequencies[mid - 1] as f64 + frequencies[mid] as f64) / 2.0
        } else {
            frequencies[mid] as f64
        }
    }

    pub fn all_word_frequencies(&self) -> &HashMap<String, u64> {
        self.table.all_entries()
    }

    /// Histogram buckets, highest frequency first.
    pub fn histogram_snapshot(&self) -> Vec<FrequencyBucket> {
        self.histogram.snapshot()
    }

    pub fn frequency_of(&self, word: &str) -> u64 {
        self.table.count_of(&word.trim().to_lowercase())
    }

    pub fn total_tokens(&self) -> u64 {
        self.table.total_tokens()
    }

    pub fn distinct_words(&self) -> usize {
        self.table.distinct_words()
    }

    pub fn top_k_capacity(&self) -> usize {
        self.top_k.capacity()
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn state(&self) -> AnalyzerState {
        if self.is_empty() {
            AnalyzerState::Empty
        } else {
            AnalyzerState::Populated
        }
    }

    /// Recompute both derived views from the counts and compare.
    ///
    /// This is a brute-force audit over the whole vocabulary, meant for
    /// debugging and tests rather than the hot path.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut expected: HashMap<u64, u64> = HashMap::new();
        for (_, count) in self.table.iter() {
            *expected.entry(count).or_insert(0) += 1;
        }

        let histogram_total = self.histogram.total_words();
        let table_total = self.table.distinct_words() as u64;
        if histogram_total != table_total {
            return Err(InvariantViolation::HistogramTotalMismatch {
                histogram: histogram_total,
                table: table_total,
            });
        }

        let mut previous: Option<u64> = None;
        for bucket in self.histogram.iter() {
            if let Some(previous) = previous {
                if bucket.frequency >= previous {
                    return Err(InvariantViolation::HistogramOrder {
                        previous,
                        next: bucket.frequency,
                    });
                }
            }
            previous = Some(bucket.frequency);

            let table = expected.remove(&bucket.frequency).unwrap_or(0);
            if table != bucket.words {
                return Err(InvariantViolation::BucketMismatch {
                    frequency: bucket.frequency,
                    histogram: bucket.words,
                    table,
                });
            }
        }
        if let Some((&frequency, &table)) = expected.iter().min() {
            return Err(InvariantViolation::BucketMismatch { frequency, histogram: 0, table });
        }

        let ranking = full_ranking(&self.table, self.top_k.capacity());
        let tracked = self.top_k.entries();
        for position in 0..ranking.len().max(tracked.len()) {
            let expected = ranking.get(position);
            let actual = tracked.get(position);
            if expected != actual {
                return Err(InvariantViolation::TopKMismatch {
                    position,
                    expected: describe(expected),
                    actual: describe(actual),
                });
            }
        }

        Ok(())
    }
}

fn describe(entry: Option<&RankedWord>) -> String {
    entry.map_or_else(|| "nothing".to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(analyzer: &Analyzer) -> Vec<(String, u64)> {
        analyzer.top_k().into_iter().map(|e| (e.word, e.frequency)).collect()
    }

    fn expected(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs.iter().map(|(w, f)| (w.to_string(), *f)).collect()
    }

    fn buckets(analyzer: &Analyzer) -> Vec<(u64, u64)> {
        analyzer.histogram_snapshot().into_iter().map(|b| (b.frequency, b.words)).collect()
    }

    #[test]
    fn test_first_batch() {
        let mut analyzer = Analyzer::new();
        let summary = analyzer.ingest("apple, banana, apple, cherry").unwrap();
        assert_eq!(summary, IngestSummary { tokens: 4, new_words: 3, changed_words: 3 });

        assert_eq!(analyzer.frequency_of("apple"), 2);
        assert_eq!(analyzer.frequency_of("banana"), 1);
        assert_eq!(analyzer.frequency_of("cherry"), 1);
        assert_eq!(top(&analyzer), expected(&[("apple", 2), ("banana", 1), ("cherry", 1)]));
        assert_eq!(analyzer.lowest_frequency(), 1);
        assert_eq!(analyzer.median_frequency(), 1.0);
        assert_eq!(buckets(&analyzer), vec![(2, 1), (1, 2)]);
        analyzer.check_invariants().unwrap();
    }

    #[test]
    fn test_second_batch_ties() {
        let mut analyzer = Analyzer::new();
        analyzer.ingest("apple, banana, apple, cherry").unwrap();
        analyzer.ingest("banana, cherry, elderberry, fig").unwrap();

        assert_eq!(analyzer.all_word_frequencies().len(), 5);
        assert_eq!(
            top(&analyzer),
            expected(&[
                ("apple", 2),
                ("banana", 2),
                ("cherry", 2),
                ("elderberry", 1),
                ("fig", 1)
            ])
        );
        assert_eq!(analyzer.median_frequency(), 2.0);
        assert_eq!(buckets(&analyzer), vec![(2, 3), (1, 2)]);
        analyzer.check_invariants().unwrap();
    }

    #[test]
    fn test_late_newcomers_leave_top_k_alone() {
        let mut analyzer = Analyzer::new();
        analyzer.ingest("apple, banana, apple, cherry").unwrap();
        analyzer.ingest("banana, cherry, elderberry, fig").unwrap();
        let before = analyzer.top_k();

        analyzer.ingest("zebra, yankee, xray, whale, violin").unwrap();
        assert_eq!(analyzer.top_k(), before);
        assert_eq!(analyzer.lowest_frequency(), 1);
        assert_eq!(analyzer.median_frequency(), 1.0);
        analyzer.check_invariants().unwrap();
    }

    #[test]
    fn test_reset() {
        let mut analyzer = Analyzer::new();
        analyzer.ingest("apple, banana, apple, cherry").unwrap();
        assert_eq!(analyzer.state(), AnalyzerState::Populated);

        analyzer.reset();
        assert_eq!(analyzer.state(), AnalyzerState::Empty);
        assert!(analyzer.top_k().is_empty());
        assert_eq!(analyzer.lowest_frequency(), 0);
        assert_eq!(analyzer.median_frequency(), 0.0);
        assert!(analyzer.histogram_snapshot().is_empty());
        assert_eq!(analyzer.total_tokens(), 0);

        // Reset twice is the same as once
        analyzer.reset();
        assert!(analyzer.is_empty());

        analyzer.ingest("kiwi").unwrap();
        assert_eq!(top(&analyzer), expected(&[("kiwi", 1)]));
    }

    #[test]
    fn test_repeated_word_histogram() {
        let mut analyzer = Analyzer::new();
        analyzer.ingest("echo, echo, echo, other").unwrap();
        assert_eq!(buckets(&analyzer), vec![(3, 1), (1, 1)]);

        analyzer.ingest("echo, echo, echo, echo").unwrap();
        assert_eq!(buckets(&analyzer), vec![(7, 1), (1, 1)]);
        assert_eq!(analyzer.histogram_snapshot().iter().filter(|b| b.frequency == 3).count(), 0);

        let mut solo = Analyzer::new();
        solo.ingest("echo, echo, echo").unwrap();
        solo.ingest("echo, echo, echo, echo").unwrap();
        assert_eq!(buckets(&solo), vec![(7, 1)]);
        assert_eq!(solo.lowest_frequency(), 7);
    }

    #[test]
    fn test_blank_input_is_noop() {
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.ingest("").unwrap(), IngestSummary::default());
        assert_eq!(analyzer.ingest("  ,  , ").unwrap(), IngestSummary::default());
        assert_eq!(analyzer.state(), AnalyzerState::Empty);
        assert_eq!(analyzer.median_frequency(), 0.0);
    }

    #[test]
    fn test_normalization_merges_case_and_whitespace() {
        let mut analyzer = Analyzer::new();
        analyzer.ingest("Apple,  APPLE , apple").unwrap();
        assert_eq!(analyzer.distinct_words(), 1);
        assert_eq!(analyzer.frequency_of(" Apple "), 3);
        assert_eq!(analyzer.total_tokens(), 3);
    }

    #[test]
    fn test_even_median_averages() {
        let mut analyzer = Analyzer::new();
        analyzer.ingest("a, a, a, b, c, c, d, d, d, d").unwrap();
        // Frequencies 1, 2, 3, 4
        assert_eq!(analyzer.median_frequency(), 2.5);
    }

    #[test]
    fn test_custom_top_k() {
        let mut analyzer = Analyzer::with_top_k(2);
        analyzer.ingest("a, b, c, c, d, d, d").unwrap();
        assert_eq!(analyzer.top_k_capacity(), 2);
        assert_eq!(top(&analyzer), expected(&[("d", 3), ("c", 2)]));

        analyzer.ingest("a, a, a").unwrap();
        assert_eq!(top(&analyzer), expected(&[("a", 4), ("d", 3)]));
        analyzer.check_invariants().unwrap();
    }

    #[test]
    fn test_check_invariants_detects_corruption() {
        let mut analyzer = Analyzer::new();
        analyzer.ingest("a, b, b").unwrap();

        analyzer.histogram.apply_delta(1, 1).unwrap();
        assert_eq!(
            analyzer.check_invariants(),
            Err(InvariantViolation::HistogramTotalMismatch { histogram: 3, table: 2 })
        );
    }

    #[test]
    fn test_check_invariants_detects_stale_top_k() {
        let mut analyzer = Analyzer::with_top_k(1);
        analyzer.ingest("a, b, b").unwrap();
        analyzer.top_k.clear();
        analyzer.top_k.reconcile(&HashSet::new(), &FrequencyTable::new());

        let err = analyzer.check_invariants().unwrap_err();
        assert!(matches!(err, InvariantViolation::TopKMismatch { position: 0, .. }));
    }

    #[test]
    fn test_ingest_surfaces_histogram_violation() {
        let mut analyzer = Analyzer::new();
        analyzer.ingest("a").unwrap();
        // Drop the bucket behind the analyzer's back
        analyzer.histogram.clear();

        let err = analyzer.ingest("a").unwrap_err();
        assert_eq!(err, InvariantViolation::MissingBucket { frequency: 1, delta: -1 });
        // The batch itself still landed
        assert_eq!(analyzer.frequency_of("a"), 2);
        assert_eq!(analyzer.histogram_snapshot(), vec![FrequencyBucket::from((2, 1))]);
    }
}
