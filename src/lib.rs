//! Wordrank - incremental word-frequency index
//!
//! This library provides functionality to:
//! - Count comma-separated words batch by batch with exact per-word totals
//! - Keep a live top-K ranking that only re-examines words a batch touched
//! - Keep a histogram of how many distinct words share each frequency
//! - Report lowest and median frequencies as text or JSON

pub mod analyze;
pub mod cli;
pub mod config;
pub mod logging;
pub mod repl;

pub use analyze::{Analyzer, InvariantViolation, RankedWord};
