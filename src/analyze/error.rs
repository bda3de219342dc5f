//! Error types for the frequency index

use thiserror::Error;

/// An internal consistency check failed.
///
/// None of these can happen while the analyzer drives its structures
/// correctly. They exist so a broken state is reported as such instead of
/// quietly producing wrong statistics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A non-positive delta was applied to a frequency with no bucket
    #[error("histogram has no bucket for frequency {frequency} (delta {delta})")]
    MissingBucket { frequency: u64, delta: i64 },
    /// A bucket count dropped below zero; the bucket was removed anyway
    #[error("histogram bucket for frequency {frequency} dropped to {count}")]
    NegativeBucket { frequency: u64, count: i64 },
    /// Histogram word total disagrees with the frequency table
    #[error("histogram accounts for {histogram} words but the table holds {table}")]
    HistogramTotalMismatch { histogram: u64, table: u64 },
    /// A single bucket disagrees with the frequency table
    #[error("histogram bucket {frequency} holds {histogram} words, the table has {table}")]
    BucketMismatch { frequency: u64, histogram: u64, table: u64 },
    /// Histogram buckets are not strictly descending
    #[error("histogram bucket {next} follows {previous}; buckets must strictly descend")]
    HistogramOrder { previous: u64, next: u64 },
    /// Incrementally maintained top-K differs from a full ranking
    #[error("top-k entry {position} is {actual} but a full ranking gives {expected}")]
    TopKMismatch { position: usize, expected: String, actual: String },
}
