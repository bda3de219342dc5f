//! Line-oriented interactive session over an [`Analyzer`]
//!
//! Each input line is either a command or a comma-separated batch of words:
//!
//! - `statistics` / `stats` - all frequencies, top words, lowest and median
//! - `debug` - raw internal state (token total, ranking, histogram)
//! - `clear` - forget every word
//! - `help` - list commands
//! - `quit` / `exit` - end the session
//!
//! The session is generic over its reader and writer so the same engine
//! drives the terminal, the scripted demo and tests.

use std::io::{self, BufRead, Write};

use crate::analyze::Analyzer;

/// Inputs replayed by the scripted demo.
pub const DEMO_SCRIPT: &[&str] = &[
    "apple, banana, apple, cherry",
    "banana, cherry, elderberry, fig",
    "apple, grape, apple, banana",
    "statistics",
    "date, elderberry, fig, grape, honey",
    "statistics",
    "clear",
    "statistics",
    "quit",
];

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Quit,
    Help,
    Clear,
    Statistics,
    Debug,
    /// A batch of comma-separated words
    Words(String),
    /// Blank line
    Empty,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Self::Empty,
            "quit" | "exit" => Self::Quit,
            "help" => Self::Help,
            "clear" => Self::Clear,
            "statistics" | "stats" => Self::Statistics,
            "debug" => Self::Debug,
            _ => Self::Words(trimmed.to_string()),
        }
    }
}

/// Interactive session state.
#[derive(Debug, Default)]
pub struct Session {
    analyzer: Analyzer,
    /// Repeat each input line after a `> ` marker (for scripted runs)
    echo: bool,
}

impl Session {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer, echo: false }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn into_analyzer(self) -> Analyzer {
        self.analyzer
    }

    /// Read lines until `quit` or end of input.
    ///
    /// `prompt` prints `> ` before each read, which only makes sense when a
    /// person is typing.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        prompt: bool,
    ) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            if self.echo {
                writeln!(out, "> {}", line)?;
            }
            if !self.execute(SessionCommand::parse(&line), out)? {
                return Ok(());
            }
        }
    }

    /// Run a single command. Returns `false` once the session should end.
    pub fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> io::Result<bool> {
        match command {
            SessionCommand::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(false);
            }
            SessionCommand::Help => write_help(out)?,
            SessionCommand::Clear => {
                self.analyzer.reset();
                writeln!(out, "Dictionary cleared.\n")?;
            }
            SessionCommand::Statistics => self.write_statistics(out)?,
            SessionCommand::Debug => self.write_debug(out)?,
            SessionCommand::Words(batch) => match self.analyzer.ingest(&batch) {
                Ok(summary) => writeln!(out, "Added {} word(s) to dictionary.\n", summary.tokens)?,
                Err(violation) => writeln!(out, "Warning: {}\n", violation)?,
            },
            SessionCommand::Empty => writeln!(out, "Please enter some words or a command.\n")?,
        }
        Ok(true)
    }

    fn write_statistics<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.analyzer.is_empty() {
            return writeln!(out, "No words in dictionary. Add some words first.\n");
        }

        writeln!(out, "\n=== Word Frequency Statistics ===")?;
        writeln!(out, "All word frequencies:")?;
        for (word, count) in self.analyzer.table().sorted_by_word() {
            writeln!(out, "  {}: {}", word, count)?;
        }

        writeln!(out, "\nTop {} most frequent words:", self.analyzer.top_k_capacity())?;
        for (rank, entry) in self.analyzer.top_k().iter().enumerate() {
            writeln!(out, "  {}. {}: {}", rank + 1, entry.word, entry.frequency)?;
        }

        writeln!(out, "\nLowest frequency: {}", self.analyzer.lowest_frequency())?;
        writeln!(out, "Median frequency: {:.1}\n", self.analyzer.median_frequency())
    }

    fn write_debug<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let top: Vec<_> = self.analyzer.top_k().iter().map(ToString::to_string).collect();
        let histogram: Vec<_> = self
            .analyzer
            .histogram_snapshot()
            .iter()
            .map(|b| format!("{}: {}", b.frequency, b.words))
            .collect();
        let all: Vec<_> = self
            .analyzer
            .table()
            .sorted_by_word()
            .into_iter()
            .map(|(word, count)| format!("{}: {}", word, count))
            .collect();

        writeln!(out, "\n=== Internal State ===")?;
        writeln!(out, "Total words: {}", self.analyzer.total_tokens())?;
        writeln!(out, "Top {} list: [{}]", self.analyzer.top_k_capacity(), top.join(", "))?;
        writeln!(out, "Tracked words: {}", self.analyzer.tracked_words())?;
        writeln!(out, "Frequency counts: [{}]", histogram.join(", "))?;
        writeln!(
            out,
            "Frequency range: {}..={}",
            self.analyzer.lowest_frequency(),
            self.analyzer.highest_frequency()
        )?;
        writeln!(out, "All frequencies: {{{}}}", all.join(", "))?;
        match self.analyzer.check_invariants() {
            Ok(()) => writeln!(out, "Invariants: ok\n"),
            Err(violation) => writeln!(out, "Invariants: {}\n", violation),
        }
    }
}

/// Print the greeting shown at the start of an interactive session.
pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Word Frequency Analyzer ===\n")?;
    writeln!(out, "Enter comma-separated words to add to the dictionary.")?;
    writeln!(out, "Type 'statistics' to see the analysis results.")?;
    writeln!(out, "Type 'debug' to see internal state.")?;
    writeln!(out, "Type 'help' for more commands.")?;
    writeln!(out, "Type 'quit' to exit.\n")
}

fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nAvailable commands:")?;
    writeln!(out, "  - Enter comma-separated words to add them to the dictionary")?;
    writeln!(out, "  - 'statistics' - Show word frequency analysis")?;
    writeln!(out, "  - 'debug' - Show internal state")?;
    writeln!(out, "  - 'clear' - Clear all words from the dictionary")?;
    writeln!(out, "  - 'help' - Show this help message")?;
    writeln!(out, "  - 'quit' - Exit the program\n")
}

/// Replay [`DEMO_SCRIPT`] through a fresh session.
pub fn run_demo<W: Write>(analyzer: Analyzer, out: &mut W) -> io::Result<Analyzer> {
    writeln!(out, "=== Word Frequency Analyzer Demo ===\n")?;
    let script = DEMO_SCRIPT.join("\n");
    let mut session = Session::new(analyzer).with_echo(true);
    session.run(script.as_bytes(), out, false)?;
    Ok(session.into_analyzer())
}
