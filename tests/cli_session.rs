//! CLI integration tests for the `wrank repl` and `wrank demo` commands.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Get the path to the wrank binary.
fn wrank_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_wrank"))
}

/// Run wrank with piped stdin and return (stdout, stderr, success).
fn run_wrank(args: &[&str], input: &str) -> (String, String, bool) {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(wrank_binary())
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute wrank");

    child.stdin.take().expect("stdin is piped").write_all(input.as_bytes()).unwrap();

    let output = child.wait_with_output().expect("Failed to wait for wrank");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_repl_piped_session() {
    let input = "apple, banana, apple, cherry\nbanana, cherry, elderberry, fig\nstatistics\nquit\n";
    let (stdout, stderr, success) = run_wrank(&["repl"], input);

    assert!(success, "stderr: {}", stderr);
    // Piped stdin is not a terminal: no banner, no prompt
    assert!(!stdout.contains("=== Word Frequency Analyzer ==="));
    assert!(!stdout.contains("> "));
    assert!(stdout.contains("Added 4 word(s) to dictionary."));
    assert!(stdout.contains(
        "Top 5 most frequent words:\n  1. apple: 2\n  2. banana: 2\n  3. cherry: 2\n  4. elderberry: 1\n  5. fig: 1\n"
    ));
    assert!(stdout.contains("Median frequency: 2.0"));
    assert!(stdout.ends_with("Goodbye!\n"));
}

#[test]
fn test_repl_clear_resets_everything() {
    let input = "kiwi, kiwi\nclear\nstatistics\ndebug\n";
    let (stdout, _, success) = run_wrank(&["repl"], input);

    assert!(success);
    assert!(stdout.contains("Dictionary cleared."));
    assert!(stdout.contains("No words in dictionary."));
    assert!(stdout.contains("Total words: 0"));
    assert!(stdout.contains("Top 5 list: []"));
    assert!(stdout.contains("Frequency counts: []"));
    assert!(stdout.contains("Tracked words: 0"));
    assert!(stdout.contains("Frequency range: 0..=0"));
}

#[test]
fn test_repl_custom_top_k() {
    let (stdout, _, success) = run_wrank(&["repl", "-k", "1"], "a, b, b\nstats\n");

    assert!(success);
    assert!(stdout.contains("Top 1 most frequent words:\n  1. b: 2\n"));
}

#[test]
fn test_demo_runs_script() {
    let (stdout, stderr, success) = run_wrank(&["demo"], "");

    assert!(success, "stderr: {}", stderr);
    assert!(stdout.starts_with("=== Word Frequency Analyzer Demo ==="));
    assert!(stdout.contains("> statistics"));
    assert!(stdout.contains("  1. apple: 4\n"));
    assert!(stdout.contains("> clear\nDictionary cleared."));
    assert!(stdout.ends_with("Goodbye!\n"));
}
