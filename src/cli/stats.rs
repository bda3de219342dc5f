//! Stats command implementation

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::analyze::{collect_files, format_report_text, Analyzer, CorpusRun};
use crate::config::{ReportFormat, WordrankConfig};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the stats command
pub fn run_stats(
    config: &WordrankConfig,
    files: &[PathBuf],
    dir: Option<&Path>,
    recursive: bool,
    stdin: bool,
    output: Option<&Path>,
    verify: bool,
) -> ExitCode {
    if files.is_empty() && dir.is_none() && !stdin {
        eprintln!("Error: No input given (pass files, --dir or --stdin)");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let file_list = match collect_files(files, dir, recursive) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if file_list.is_empty() && !stdin {
        eprintln!("Error: No files to analyze");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut run = CorpusRun::new(Analyzer::from_config(&config.analyzer), verify);
    let total_files = file_list.len();
    let show_progress = total_files > 1 && output.is_some();

    for (i, path) in file_list.iter().enumerate() {
        if show_progress {
            eprint!("\rAnalyzing file {}/{}: {}", i + 1, total_files, path.display());
        }
        if let Err(e) = run.analyze_file(path) {
            run.record_failure(path, e);
        }
    }
    if show_progress {
        eprintln!(); // Clear progress line
    }

    if stdin {
        if let Err(e) = run.analyze_reader(io::stdin().lock()) {
            eprintln!("Error reading stdin: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let report = run.report(config.report.all_frequencies);
    let output_text = match config.report.format {
        ReportFormat::Json => match report.to_json() {
            Ok(json) => json + "\n",
            Err(e) => {
                eprintln!("Error: Failed to serialize report: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        ReportFormat::Text => format_report_text(&report),
    };

    if let Some(output_path) = output {
        if let Err(e) = std::fs::write(output_path, &output_text) {
            eprintln!("Error: Failed to write '{}': {}", output_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Report written to: {}", output_path.display());
    } else {
        print!("{}", output_text);
    }

    if verify && !run.violations.is_empty() {
        eprintln!("Error: {} invariant violation(s) detected", run.violations.len());
        return ExitCode::from(EXIT_ERROR);
    }

    ExitCode::from(EXIT_SUCCESS)
}
