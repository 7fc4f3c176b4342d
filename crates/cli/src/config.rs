//! CLI configuration file
//!
//! Looked up at `--config <FILE>` if given, else `<config dir>/fmon/config.toml`
//! when that file exists. Every field has a default, so an empty or missing
//! file is valid.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use watcher::WatcherConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub watcher: WatcherConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// How events are printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Line format (default: text)
    #[serde(default)]
    pub format: OutputFormat,

    /// Colorize text output (default: true)
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `added /path/to/file`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn default_true() -> bool {
    true
}

/// Default config file location
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fmon").join("config.toml"))
}

/// Load configuration
///
/// An explicit path must exist; the default location is optional.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return read(path);
    }

    match config_file_path() {
        Some(path) if path.exists() => read(&path),
        _ => Ok(AppConfig::default()),
    }
}

fn read(path: &Path) -> Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

fn parse(text: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(text)?;
    if config.watcher.channel_capacity == 0 {
        anyhow::bail!("watcher.channel_capacity must be at least 1");
    }
    Ok(config)
}

/// Sample configuration with every option spelled out
pub fn example_config() -> &'static str {
    r#"# fmon configuration

[watcher]
# Extra gitignore-style patterns, relative to the watched directory.
# Hidden entries and .DS_Store files are always skipped.
ignore_patterns = ["*.swp", "target/"]

# Queue size between the OS event source and the classifier
channel_capacity = 256

[output]
# "text" or "json"
format = "text"
color = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.output.color);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_example_config_parses() {
        let config = parse(example_config()).unwrap();

        assert_eq!(config.watcher.ignore_patterns, vec!["*.swp", "target/"]);
        assert_eq!(config.watcher.channel_capacity, 256);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse("[output]\nformat = \"json\"\n").unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.color);
        assert!(config.watcher.ignore_patterns.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(parse("[watcher]\nchannel_capacity = 0\n").is_err());
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = load(Some(&temp_dir.path().join("nope.toml"))).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_explicit_file_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fmon.toml");
        std::fs::write(&path, "[watcher]\nignore_patterns = [\"*.log\"]\n").unwrap();

        let config = load(Some(&path)).unwrap();

        assert_eq!(config.watcher.ignore_patterns, vec!["*.log"]);
    }
}
