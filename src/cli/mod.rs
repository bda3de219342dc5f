//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod session;
mod stats;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{
    load_config, merge_cli_overrides, CliOverrides, ConfigError, ReportFormat, WordrankConfig,
};
use crate::logging;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Wordrank - incremental word frequencies, top words and frequency histogram
#[derive(Parser)]
#[command(name = "wrank")]
#[command(about = "Wordrank - track word frequencies, top words and a frequency histogram")]
#[command(version)]
pub struct Cli {
    /// Path to wordrank.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest files or stdin (one batch per line) and print statistics
    Stats {
        /// Input files, one comma-separated batch per line
        files: Vec<PathBuf>,

        /// Directory to scan for .txt/.csv files
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Include subdirectories when scanning a directory
        #[arg(long, short)]
        recursive: bool,

        /// Read batches from stdin (after any files)
        #[arg(long)]
        stdin: bool,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,

        /// Number of top words to track (1-64)
        #[arg(long, short = 'k')]
        top_k: Option<usize>,

        /// Omit the per-word frequency listing
        #[arg(long)]
        summary: bool,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Audit the index after every batch; exit 1 on any inconsistency
        #[arg(long)]
        verify: bool,
    },

    /// Start an interactive session reading batches and commands from stdin
    Repl {
        /// Number of top words to track (1-64)
        #[arg(long, short = 'k')]
        top_k: Option<usize>,
    },

    /// Replay a short scripted session
    Demo {
        /// Number of top words to track (1-64)
        #[arg(long, short = 'k')]
        top_k: Option<usize>,
    },
}

impl Commands {
    fn overrides(&self) -> CliOverrides {
        match self {
            Commands::Stats { format, top_k, summary, .. } => CliOverrides {
                top_k: *top_k,
                format: *format,
                all_frequencies: summary.then_some(false),
            },
            Commands::Repl { top_k } | Commands::Demo { top_k } => {
                CliOverrides { top_k: *top_k, ..Default::default() }
            }
        }
    }
}

/// Load config from disk and apply command-line overrides.
fn effective_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<WordrankConfig, ConfigError> {
    let mut config = load_config(path)?;
    merge_cli_overrides(&mut config, overrides)?;
    Ok(config)
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match effective_config(cli.config.as_deref(), &cli.command.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = match e {
                ConfigError::Validation(_) => EXIT_INVALID_ARGS,
                _ => EXIT_ERROR,
            };
            return ExitCode::from(code);
        }
    };

    logging::init(&config.logging.filter);

    match cli.command {
        Commands::Stats { files, dir, recursive, stdin, output, verify, .. } => stats::run_stats(
            &config,
            &files,
            dir.as_deref(),
            recursive,
            stdin,
            output.as_deref(),
            verify,
        ),
        Commands::Repl { .. } => session::run_repl(&config),
        Commands::Demo { .. } => session::run_demo(&config),
    }
}
