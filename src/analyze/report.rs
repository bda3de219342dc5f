//! Statistics reports and corpus file collection

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use super::analyzer::Analyzer;
use super::error::InvariantViolation;
use super::histogram::FrequencyBucket;
use super::top_k::RankedWord;

/// File extensions picked up when scanning a directory.
const CORPUS_EXTENSIONS: &[&str] = &["txt", "csv"];

/// Serializable snapshot of an analyzer plus run bookkeeping.
#[derive(Debug, Default, Clone, Serialize)]
pub struct StatisticsReport {
    /// Number of files read
    pub files_analyzed: usize,
    /// Number of files that could not be read
    pub files_failed: usize,
    /// Non-blank input lines ingested
    pub batches: usize,
    /// Token occurrences across all batches
    pub total_tokens: u64,
    /// Distinct normalized words
    pub distinct_words: usize,
    /// Ranking size the analyzer was configured with
    pub top_k_capacity: usize,
    /// Best-ranked words
    pub top_k: Vec<RankedWord>,
    pub lowest_frequency: u64,
    pub median_frequency: f64,
    /// Distinct-frequency histogram, highest first
    pub histogram: Vec<FrequencyBucket>,
    /// Every word with its count, alphabetical
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_frequencies: Option<BTreeMap<String, u64>>,
    /// Files that failed, with the reason
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_files: Vec<(PathBuf, String)>,
    /// Consistency problems detected during the run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invariant_violations: Vec<String>,
}

impl StatisticsReport {
    /// Capture the current state of an analyzer.
    pub fn from_analyzer(analyzer: &Analyzer, include_all: bool) -> Self {
        let all_frequencies = include_all.then(|| {
            analyzer.all_word_frequencies().iter().map(|(w, c)| (w.clone(), *c)).collect()
        });

        Self {
            total_tokens: analyzer.total_tokens(),
            distinct_words: analyzer.distinct_words(),
            top_k_capacity: analyzer.top_k_capacity(),
            top_k: analyzer.top_k(),
            lowest_frequency: analyzer.lowest_frequency(),
            median_frequency: analyzer.median_frequency(),
            histogram: analyzer.histogram_snapshot(),
            all_frequencies,
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Feeds files or readers into an analyzer line by line.
///
/// Each input line is one batch. Unreadable files are recorded and skipped
/// so one bad path does not lose the rest of the corpus.
#[derive(Debug, Default)]
pub struct CorpusRun {
    pub analyzer: Analyzer,
    /// Audit the analyzer after every batch
    pub verify: bool,
    pub files_analyzed: usize,
    pub files_failed: usize,
    pub batches: usize,
    pub failed_files: Vec<(PathBuf, String)>,
    pub violations: Vec<InvariantViolation>,
}

impl CorpusRun {
    pub fn new(analyzer: Analyzer, verify: bool) -> Self {
        Self { analyzer, verify, ..Self::default() }
    }

    /// Ingest one batch, recording any violation instead of stopping.
    pub fn analyze_batch(&mut self, line: &str) {
        match self.analyzer.ingest(line) {
            Ok(summary) if summary.tokens == 0 => return,
            Ok(_) => {}
            Err(violation) => self.violations.push(violation),
        }
        self.batches += 1;

        if self.verify {
            if let Err(violation) = self.analyzer.check_invariants() {
                tracing::warn!(batch = self.batches, %violation, "invariant audit failed");
                self.violations.push(violation);
            }
        }
    }

    /// Ingest every line of a reader.
    pub fn analyze_reader<R: BufRead>(&mut self, reader: R) -> std::io::Result<()> {
        for line in reader.lines() {
            self.analyze_batch(&line?);
        }
        Ok(())
    }

    /// Ingest every line of a file.
    ///
    /// The file is read in full first, so a file that fails partway through
    /// contributes nothing to the index.
    pub fn analyze_file(&mut self, path: &Path) -> Result<(), String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
        for line in content.lines() {
            self.analyze_batch(line);
        }
        self.files_analyzed += 1;
        Ok(())
    }

    /// Record a file that could not be analyzed.
    pub fn record_failure(&mut self, path: &Path, reason: String) {
        tracing::warn!(path = %path.display(), %reason, "skipping input file");
        self.files_failed += 1;
        self.failed_files.push((path.to_path_buf(), reason));
    }

    pub fn report(&self, include_all: bool) -> StatisticsReport {
        StatisticsReport {
            files_analyzed: self.files_analyzed,
            files_failed: self.files_failed,
            batches: self.batches,
            failed_files: self.failed_files.clone(),
            invariant_violations: self.violations.iter().map(ToString::to_string).collect(),
            ..StatisticsReport::from_analyzer(&self.analyzer, include_all)
        }
    }
}

/// Resolve the input files for a run.
///
/// Named files are taken as given and must exist. Without them, `dir` is
/// scanned for corpus files (sorted), nested directories only when
/// `recursive` is set.
pub fn collect_files(
    files: &[PathBuf],
    dir: Option<&Path>,
    recursive: bool,
) -> Result<Vec<PathBuf>, String> {
    if !files.is_empty() {
        return match files.iter().find(|path| !path.exists()) {
            Some(missing) => Err(format!("File not found: {}", missing.display())),
            None => Ok(files.to_vec()),
        };
    }

    let Some(root) = dir else {
        return Ok(Vec::new());
    };
    if !root.exists() {
        return Err(format!("Directory not found: {}", root.display()));
    }
    if !root.is_dir() {
        return Err(format!("Not a directory: {}", root.display()));
    }

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries =
            fs::read_dir(&current).map_err(|e| format!("Failed to read directory: {}", e))?;
        for entry in entries {
            let path = entry.map_err(|e| format!("Failed to read entry: {}", e))?.path();
            if path.is_dir() {
                if recursive {
                    pending.push(path);
                }
            } else if is_corpus_file(&path) {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

fn is_corpus_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| CORPUS_EXTENSIONS.contains(&ext.as_str()))
}

/// Format the statistics report as text.
pub fn format_report_text(report: &StatisticsReport) -> String {
    let mut output = String::new();

    output.push_str("Wordrank Statistics Report\n");
    output.push_str("==========================\n");
    if report.files_analyzed > 0 {
        output.push_str(&format!("Files analyzed: {}\n", report.files_analyzed));
    }
    if report.files_failed > 0 {
        output.push_str(&format!("Files failed: {}\n", report.files_failed));
    }
    if report.batches > 0 {
        output.push_str(&format!("Batches: {}\n", report.batches));
    }
    output.push_str(&format!("Total words: {}\n", report.total_tokens));
    output.push_str(&format!("Distinct words: {}\n", report.distinct_words));
    output.push('\n');

    if report.distinct_words == 0 {
        output.push_str("No words recorded.\n\n");
    } else {
        write_word_sections(&mut output, report);
    }

    if !report.failed_files.is_empty() {
        output.push_str("FAILED FILES\n");
        output.push_str("────────────\n");
        for (path, error) in &report.failed_files {
            output.push_str(&format!("  {}: {}\n", path.display(), error));
        }
        output.push('\n');
    }

    if !report.invariant_violations.is_empty() {
        output.push_str("INVARIANT VIOLATIONS\n");
        output.push_str("────────────────────\n");
        for violation in &report.invariant_violations {
            output.push_str(&format!("  {}\n", violation));
        }
        output.push('\n');
    }

    output
}

fn write_word_sections(output: &mut String, report: &StatisticsReport) {
    if let Some(all) = &report.all_frequencies {
        output.push_str("ALL WORD FREQUENCIES\n");
        output.push_str("────────────────────\n");
        for (word, count) in all {
            output.push_str(&format!("  {}: {}\n", word, count));
        }
        output.push('\n');
    }

    let heading = format!("TOP {} MOST FREQUENT WORDS", report.top_k_capacity);
    output.push_str(&format!("{}\n{}\n", heading, "─".repeat(heading.chars().count())));
    for (rank, entry) in report.top_k.iter().enumerate() {
        output.push_str(&format!("  {}. {}: {}\n", rank + 1, entry.word, entry.frequency));
    }
    output.push('\n');

    output.push_str("FREQUENCY SUMMARY\n");
    output.push_str("─────────────────\n");
    output.push_str(&format!("  Lowest frequency: {}\n", report.lowest_frequency));
    output.push_str(&format!("  Median frequency: {:.1}\n", report.median_frequency));
    output.push('\n');

    output.push_str("FREQUENCY HISTOGRAM\n");
    output.push_str("───────────────────\n");
    for bucket in &report.histogram {
        let noun = if bucket.words == 1 { "word" } else { "words" };
        output.push_str(&format!("  {:>6}x  {:>6} {}\n", bucket.frequency, bucket.words, noun));
    }
    output.push('\n');
}
