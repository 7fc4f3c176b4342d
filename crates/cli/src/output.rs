//! Event printing

use crate::config::{OutputConfig, OutputFormat};
use anyhow::Result;
use owo_colors::OwoColorize;
use watcher::SemanticEvent;

pub struct Printer {
    config: OutputConfig,
}

impl Printer {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render one event as a single line
    pub fn format(&self, event: &SemanticEvent) -> Result<String> {
        match self.config.format {
            OutputFormat::Json => Ok(serde_json::to_string(event)?),
            OutputFormat::Text => {
                let label = format!("{:<7}", event.label());
                let label = if !self.config.color {
                    label
                } else {
                    match event {
                        SemanticEvent::Added(_) => label.green().to_string(),
                        SemanticEvent::Changed(_) => label.yellow().to_string(),
                        SemanticEvent::Deleted(_) => label.red().to_string(),
                    }
                };
                Ok(format!("{} {}", label, event.path().display()))
            }
        }
    }

    pub fn print(&self, event: &SemanticEvent) -> Result<()> {
        println!("{}", self.format(event)?);
        Ok(())
    }
}
