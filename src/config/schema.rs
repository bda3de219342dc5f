//! Configuration schema types for `wordrank.toml`
//!
//! Defines the structure and validation rules for wordrank configuration.

use serde::{Deserialize, Serialize};

use crate::analyze::DEFAULT_TOP_K;

/// Largest ranking size accepted from configuration.
pub const MAX_TOP_K: usize = 64;

/// Output format for statistics reports
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Analyzer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Number of top-ranked words to maintain
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { top_k: default_top_k() }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output format
    #[serde(default)]
    pub format: ReportFormat,
    /// List every word with its count
    #[serde(default = "default_true")]
    pub all_frequencies: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { format: ReportFormat::default(), all_frequencies: true }
    }
}

fn default_true() -> bool {
    true
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set (e.g. "warn", "wordrank=debug")
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

fn default_filter() -> String {
    "warn".to_string()
}

/// Root configuration structure for `wordrank.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordrankConfig {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "analyzer.top_k")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordrank.toml: '{}' {}", self.field, self.message)
    }
}

impl WordrankConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.analyzer.top_k == 0 || self.analyzer.top_k > MAX_TOP_K {
            errors.push(ConfigValidationError {
                field: "analyzer.top_k".to_string(),
                message: format!("must be between 1 and {}", MAX_TOP_K),
            });
        }

        if self.logging.filter.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "logging.filter".to_string(),
                message: "must be a non-empty filter directive".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: WordrankConfig = toml::from_str("").unwrap();
        assert_eq!(config.analyzer.top_k, 5);
        assert_eq!(config.report.format, ReportFormat::Text);
        assert!(config.report.all_frequencies);
        assert_eq!(config.logging.filter, "warn");
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[analyzer]
top_k = 10

[report]
format = "json"
all_frequencies = false

[logging]
filter = "wordrank=debug"
"#;
        let config: WordrankConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.analyzer.top_k, 10);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(!config.report.all_frequencies);
        assert_eq!(config.logging.filter, "wordrank=debug");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let toml = r#"
[report]
format = "yaml"
"#;
        assert!(toml::from_str::<WordrankConfig>(toml).is_err());
    }

    #[test]
    fn test_validation_top_k_range() {
        let mut config = WordrankConfig::default();
        config.analyzer.top_k = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "analyzer.top_k");

        config.analyzer.top_k = MAX_TOP_K + 1;
        assert!(!config.is_valid());

        config.analyzer.top_k = MAX_TOP_K;
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation_empty_filter() {
        let mut config = WordrankConfig::default();
        config.logging.filter = "  ".to_string();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("logging.filter"));
    }
}
