//! Distinct-frequency histogram
//!
//! Records how many distinct words currently sit at each frequency without
//! storing the words themselves. Memory grows with the number of distinct
//! frequency values, which stays far below the vocabulary size for natural
//! text.

use serde::Serialize;
use std::collections::HashMap;

use super::error::InvariantViolation;

/// One histogram entry: `words` distinct words occur exactly `frequency` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyBucket {
    pub frequency: u64,
    pub words: u64,
}

impl From<(u64, u64)> for FrequencyBucket {
    fn from((frequency, words): (u64, u64)) -> Self {
        Self { frequency, words }
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    frequency: u64,
    count: u64,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Histogram stored as an arena-backed doubly-linked list.
///
/// Nodes are kept in strictly descending frequency order from `head` to
/// `tail`. Freed slots are recycled through `free`, and `index` maps a
/// frequency to its slot so point lookups skip the list walk.
#[derive(Debug, Default, Clone)]
pub struct RankHistogram {
    slots: Vec<Node>,
    free: Vec<usize>,
    index: HashMap<u64, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl RankHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the number of words at `frequency` by `delta`.
    ///
    /// A bucket whose count reaches zero is unlinked. A missing bucket is
    /// created for a positive delta at its sorted position, found by walking
    /// from the head. A non-positive delta against a missing bucket changes
    /// nothing and is reported, as is a bucket driven below zero (which is
    /// still removed).
    pub fn apply_delta(&mut self, frequency: u64, delta: i64) -> Result<(), InvariantViolation> {
        if delta == 0 {
            return Ok(());
        }

        let Some(id) = self.index.get(&frequency).copied() else {
            if delta < 0 {
                return Err(InvariantViolation::MissingBucket { frequency, delta });
            }
            self.insert(frequency, delta.unsigned_abs());
            return Ok(());
        };

        let updated = self.slots[id].count as i64 + delta;
        if updated > 0 {
            self.slots[id].count = updated as u64;
            return Ok(());
        }

        self.unlink(id);
        if updated < 0 {
            return Err(InvariantViolation::NegativeBucket { frequency, count: updated });
        }
        Ok(())
    }

    /// Frequency of the lowest bucket, 0 when empty.
    pub fn lowest_active_frequency(&self) -> u64 {
        self.tail.map_or(0, |id| self.slots[id].frequency)
    }

    /// Frequency of the highest bucket, 0 when empty.
    pub fn highest_active_frequency(&self) -> u64 {
        self.head.map_or(0, |id| self.slots[id].frequency)
    }

    /// Number of words at exactly `frequency`.
    pub fn count_at(&self, frequency: u64) -> u64 {
        self.index.get(&frequency).map_or(0, |&id| self.slots[id].count)
    }

    /// Iterate buckets from highest to lowest frequency.
    pub fn iter(&self) -> Iter<'_> {
        Iter { histogram: self, cursor: self.head }
    }

    /// Buckets from highest to lowest frequency.
    pub fn snapshot(&self) -> Vec<FrequencyBucket> {
        self.iter().collect()
    }

    /// Sum of all bucket counts, i.e. the number of distinct words covered.
    pub fn total_words(&self) -> u64 {
        self.iter().map(|bucket| bucket.words).sum()
    }

    /// Number of buckets (distinct frequencies).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    fn insert(&mut self, frequency: u64, count: u64) {
        // First node with a lower frequency becomes the successor
        let mut cursor = self.head;
        while let Some(id) = cursor {
            if self.slots[id].frequency < frequency {
                break;
            }
            cursor = self.slots[id].next;
        }

        let (prev, next) = match cursor {
            Some(id) => (self.slots[id].prev, Some(id)),
            None => (self.tail, None),
        };
        let id = self.alloc(Node { frequency, count, prev, next });

        match prev {
            Some(p) => self.slots[p].next = Some(id),
            None => self.head = Some(id),
        }
        match next {
            Some(n) => self.slots[n].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.index.insert(frequency, id);
    }

    fn alloc(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = node;
                id
            }
            None => {
                self.slots.push(node);
                self.slots.len() - 1
            }
        }
    }

    fn unlink(&mut self, id: usize) {
        let Node { frequency, prev, next, .. } = self.slots[id];
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.index.remove(&frequency);
        self.free.push(id);
    }
}

/// Iterator over histogram buckets, highest frequency first.
pub struct Iter<'a> {
    histogram: &'a RankHistogram,
    cursor: Option<usize>,
}

impl Iterator for Iter<'_> {
    type Item = FrequencyBucket;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.histogram.slots[self.cursor?];
        self.cursor = node.next;
        Some(FrequencyBucket { frequency: node.frequency, words: node.count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(pairs: &[(u64, u64)]) -> Vec<FrequencyBucket> {
        pairs.iter().copied().map(FrequencyBucket::from).collect()
    }

    #[test]
    fn test_empty_histogram() {
        let histogram = RankHistogram::new();
        assert!(histogram.is_empty());
        assert_eq!(histogram.lowest_active_frequency(), 0);
        assert_eq!(histogram.highest_active_frequency(), 0);
        assert!(histogram.snapshot().is_empty());
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut histogram = RankHistogram::new();
        histogram.apply_delta(3, 1).unwrap();
        histogram.apply_delta(7, 2).unwrap();
        histogram.apply_delta(1, 4).unwrap();
        histogram.apply_delta(5, 1).unwrap();

        assert_eq!(histogram.snapshot(), buckets(&[(7, 2), (5, 1), (3, 1), (1, 4)]));
        assert_eq!(histogram.lowest_active_frequency(), 1);
        assert_eq!(histogram.highest_active_frequency(), 7);
        assert_eq!(histogram.total_words(), 8);
    }

    #[test]
    fn test_existing_bucket_is_adjusted_in_place() {
        let mut histogram = RankHistogram::new();
        histogram.apply_delta(2, 1).unwrap();
        histogram.apply_delta(2, 3).unwrap();
        histogram.apply_delta(2, -1).unwrap();
        assert_eq!(histogram.count_at(2), 3);
        assert_eq!(histogram.len(), 1);
    }

    #[test]
    fn test_bucket_removed_at_zero() {
        let mut histogram = RankHistogram::new();
        histogram.apply_delta(1, 1).unwrap();
        histogram.apply_delta(2, 1).unwrap();
        histogram.apply_delta(3, 1).unwrap();

        // Remove the middle, then both ends
        histogram.apply_delta(2, -1).unwrap();
        assert_eq!(histogram.snapshot(), buckets(&[(3, 1), (1, 1)]));
        histogram.apply_delta(3, -1).unwrap();
        assert_eq!(histogram.snapshot(), buckets(&[(1, 1)]));
        histogram.apply_delta(1, -1).unwrap();
        assert!(histogram.is_empty());
        assert_eq!(histogram.lowest_active_frequency(), 0);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut histogram = RankHistogram::new();
        histogram.apply_delta(1, 1).unwrap();
        histogram.apply_delta(1, -1).unwrap();
        histogram.apply_delta(4, 1).unwrap();
        histogram.apply_delta(2, 1).unwrap();

        assert_eq!(histogram.slots.len(), 2);
        assert_eq!(histogram.snapshot(), buckets(&[(4, 1), (2, 1)]));
    }

    #[test]
    fn test_missing_bucket_decrement_is_reported() {
        let mut histogram = RankHistogram::new();
        histogram.apply_delta(2, 1).unwrap();

        let err = histogram.apply_delta(5, -1).unwrap_err();
        assert_eq!(err, InvariantViolation::MissingBucket { frequency: 5, delta: -1 });
        assert_eq!(histogram.snapshot(), buckets(&[(2, 1)]));
    }

    #[test]
    fn test_negative_bucket_is_removed_and_reported() {
        let mut histogram = RankHistogram::new();
        histogram.apply_delta(2, 1).unwrap();

        let err = histogram.apply_delta(2, -3).unwrap_err();
        assert_eq!(err, InvariantViolation::NegativeBucket { frequency: 2, count: -2 });
        assert!(histogram.is_empty());
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut histogram = RankHistogram::new();
        histogram.apply_delta(9, 0).unwrap();
        assert!(histogram.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut histogram = RankHistogram::new();
        histogram.apply_delta(1, 2).unwrap();
        histogram.apply_delta(6, 1).unwrap();
        histogram.clear();
        assert!(histogram.is_empty());
        assert_eq!(histogram.count_at(1), 0);
        histogram.apply_delta(3, 1).unwrap();
        assert_eq!(histogram.snapshot(), buckets(&[(3, 1)]));
    }
}
