//! Interactive and scripted session commands

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use crate::analyze::Analyzer;
use crate::config::WordrankConfig;
use crate::repl::{self, Session};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the repl command
pub fn run_repl(config: &WordrankConfig) -> ExitCode {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut out = io::stdout().lock();

    if interactive {
        if let Err(e) = repl::write_banner(&mut out) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let mut session = Session::new(Analyzer::from_config(&config.analyzer));
    match session.run(stdin.lock(), &mut out, interactive) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the demo command
pub fn run_demo(config: &WordrankConfig) -> ExitCode {
    let mut out = io::stdout().lock();
    match repl::run_demo(Analyzer::from_config(&config.analyzer), &mut out) {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
