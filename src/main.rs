//! Wordrank - command-line tool for incremental word-frequency statistics

use std::process::ExitCode;

use wordrank::cli;

fn main() -> ExitCode {
    cli::run()
}
