//! Configuration loading from nestbench.toml
//!
//! The configuration is discovered by walking up from the current directory.
//! Command-line flags override anything set in the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up by [`NestConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "nestbench.toml";

/// nestbench configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NestConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// How each operation is timed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Repetitions per operation
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    /// Wall-clock budget per operation (e.g., "30s"); unlimited when unset
    #[serde(default)]
    pub timeout: Option<String>,
    /// Show a progress bar on stderr
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            timeout: None,
            progress: default_progress(),
        }
    }
}

fn default_iterations() -> u64 {
    nestbench_core::DEFAULT_ITERATIONS
}
fn default_progress() -> bool {
    true
}

/// Where and how the report is written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: human, json, csv
    #[serde(default = "default_format")]
    pub format: String,
    /// Report file; stdout when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl NestConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("invalid {}", path.display()))?;
        Ok(config)
    }

    /// Walk up from the current directory and load the first nestbench.toml.
    ///
    /// A file that exists but does not parse is an error.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# nestbench configuration

[runner]
# Repetitions per operation
iterations = 100000
# Wall-clock budget per operation (uncomment to enable)
# timeout = "30s"
# Progress bar on stderr
progress = true

[output]
# Output format: human, json, csv
format = "human"
# Report file (stdout if unset)
# path = "target/nestbench/report.txt"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if !value.is_finite() || value < 0.0 {
            return Err(anyhow::anyhow!("Invalid duration number: {}", num_part));
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NestConfig::default();
        assert_eq!(config.runner.iterations, 100_000);
        assert_eq!(config.runner.timeout, None);
        assert!(config.runner.progress);
        assert_eq!(config.output.format, "human");
        assert_eq!(config.output.path, None);
    }

    #[test]
    fn test_default_toml_matches_defaults() {
        let parsed: NestConfig = toml::from_str(&NestConfig::default_toml()).unwrap();
        assert_eq!(parsed, NestConfig::default());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(NestConfig::parse_duration("3s").unwrap(), 3_000_000_000);
        assert_eq!(NestConfig::parse_duration("500ms").unwrap(), 500_000_000);
        assert_eq!(NestConfig::parse_duration("100us").unwrap(), 100_000);
        assert_eq!(NestConfig::parse_duration("1000ns").unwrap(), 1000);
        assert_eq!(NestConfig::parse_duration("2m").unwrap(), 120_000_000_000);
        assert_eq!(NestConfig::parse_duration("1.5s").unwrap(), 1_500_000_000);
        assert_eq!(NestConfig::parse_duration("7").unwrap(), 7_000_000_000);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(NestConfig::parse_duration("").is_err());
        assert!(NestConfig::parse_duration("fast").is_err());
        assert!(NestConfig::parse_duration("3h").is_err());
        assert!(NestConfig::parse_duration("-1s").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[runner]
iterations = 10
timeout = "250ms"

[output]
format = "csv"
path = "out/report.csv"
"#;
        let config: NestConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.iterations, 10);
        assert_eq!(config.runner.timeout.as_deref(), Some("250ms"));
        assert!(config.runner.progress);
        assert_eq!(config.output.format, "csv");
        assert_eq!(config.output.path, Some(PathBuf::from("out/report.csv")));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: NestConfig = toml::from_str("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.runner, RunnerConfig::default());
        assert_eq!(config.output.format, "json");
    }
}
