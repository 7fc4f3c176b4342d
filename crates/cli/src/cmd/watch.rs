//! Watch a directory and print classified events

use crate::config::{self, AppConfig, OutputFormat};
use crate::output::Printer;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::debug;
use watcher::Watcher;

/// Command-line overrides for `fmon watch`
#[derive(Debug, Default)]
pub struct WatchOptions {
    pub json: bool,
    pub no_color: bool,
    pub ignore: Vec<String>,
    pub config: Option<PathBuf>,
}

impl WatchOptions {
    /// Layer flags over the file configuration
    fn apply(self, mut config: AppConfig) -> AppConfig {
        config.watcher.ignore_patterns.extend(self.ignore);
        if self.json {
            config.output.format = OutputFormat::Json;
        }
        if self.no_color {
            config.output.color = false;
        }
        config
    }
}

pub async fn run(dir: &Path, options: WatchOptions) -> Result<()> {
    let file_config = config::load(options.config.as_deref())?;
    let config = options.apply(file_config);

    let (tx, mut rx) = mpsc::channel(config.watcher.channel_capacity);
    let mut watcher = Watcher::new(dir, tx, config.watcher.clone())
        .with_context(|| format!("Failed to watch {}", dir.display()))?;
    watcher.start()?;

    eprintln!(
        "{} {} {}",
        "Watching".green().bold(),
        watcher.root().display(),
        "(Ctrl-C to stop)".dimmed()
    );

    let printer = Printer::new(config.output);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => printer.print(&event)?,
                None => {
                    debug!("Event stream closed");
                    break;
                }
            },
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    watcher.stop().await?;
    eprintln!("{}", "Stopped".dimmed());
    Ok(())
}
