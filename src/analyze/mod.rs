//! Incremental word-frequency index
//!
//! Maintains, as comma-separated batches stream in:
//! - Exact per-word occurrence counts
//! - The top-K words, reconciled using only the words each batch touched
//! - A histogram of how many distinct words share each frequency
//!
//! plus reporting helpers that turn an analyzer into text or JSON.

mod analyzer;
mod error;
mod histogram;
mod report;
mod tokens;
mod top_k;

// Re-export public API
pub use analyzer::{Analyzer, AnalyzerState, IngestSummary};
pub use error::InvariantViolation;
pub use histogram::{FrequencyBucket, RankHistogram};
pub use report::{collect_files, format_report_text, CorpusRun, StatisticsReport};
pub use tokens::{tokenize, FrequencyTable};
pub use top_k::{full_ranking, rank_order, RankedWord, TopKTracker, DEFAULT_TOP_K};
