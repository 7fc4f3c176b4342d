//! Watcher error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for watcher operations
pub type Result<T, E = WatcherError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum WatcherError {
    /// Watched root could not be resolved to a canonical path
    #[error("invalid watch root {}: {source}", root.display())]
    InvalidRoot {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory listing could not be produced
    #[error("failed to enumerate {}: {source}", root.display())]
    Enumeration {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// OS event subscription could not be established
    #[error("failed to subscribe to events under {}: {source}", root.display())]
    Subscription {
        root: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Configured ignore pattern is not valid gitignore syntax
    #[error("invalid ignore pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("watcher is already running")]
    AlreadyStarted,

    #[error("watcher has been stopped")]
    Stopped,

    /// Worker task terminated abnormally
    #[error("watcher worker failed: {0}")]
    WorkerPanicked(#[from] tokio::task::JoinError),
}

impl WatcherError {
    pub(crate) fn enumeration(root: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Enumeration {
            root: root.into(),
            source,
        }
    }
}
