//! Watcher configuration

use serde::{Deserialize, Serialize};

/// Watcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Additional gitignore-style patterns excluded from listings and events
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Capacity of the worker queue (default: 256)
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: vec![],
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_channel_capacity() -> usize {
    256
}
