//! Configuration command

use crate::config::{self, example_config};
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

/// Print a sample configuration file
pub fn run_example() -> Result<()> {
    print!("{}", example_config());
    Ok(())
}

/// Print the effective configuration
pub fn run_show(config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    let source = match config_path {
        Some(path) => path.display().to_string(),
        None => match config::config_file_path() {
            Some(path) if path.exists() => path.display().to_string(),
            Some(path) => format!("{} (not found, using defaults)", path.display()),
            None => "defaults".to_string(),
        },
    };

    eprintln!("{}: {}\n", "Location".dimmed(), source.dimmed());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
