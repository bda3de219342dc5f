//! Configuration loading and discovery for `wordrank.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{ReportFormat, WordrankConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up during discovery
pub const CONFIG_FILE_NAME: &str = "wordrank.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse wordrank.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override ranking size
    pub top_k: Option<usize>,
    /// Override report format
    pub format: Option<ReportFormat>,
    /// Override listing of every word
    pub all_frequencies: Option<bool>,
}

/// Locate `wordrank.toml`: the nearest one at or above the working directory,
/// else `$XDG_CONFIG_HOME/wordrank/` (falling back to `~/.config/wordrank/`).
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from).or_else(find_xdg_config)
}

pub fn find_xdg_config() -> Option<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };
    let candidate = base.join("wordrank").join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Nearest `wordrank.toml` in `start` or any of its ancestors.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|path| path.is_file())
}

/// Load and validate the config at `path`, or the discovered one.
///
/// Defaults apply when no file exists anywhere.
pub fn load_config(path: Option<&Path>) -> Result<WordrankConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(WordrankConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<WordrankConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: WordrankConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged
/// configuration is validated again so an out-of-range `--top-k` is caught.
pub fn merge_cli_overrides(
    config: &mut WordrankConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(top_k) = overrides.top_k {
        config.analyzer.top_k = top_k;
    }
    if let Some(format) = overrides.format {
        config.report.format = format;
    }
    if let Some(all_frequencies) = overrides.all_frequencies {
        config.report.all_frequencies = all_frequencies;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}
