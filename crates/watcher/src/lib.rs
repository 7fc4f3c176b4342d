//! File system watching for the file monitor
//!
//! This crate turns raw OS notifications into Added/Changed/Deleted events:
//! - Full re-listing of the watched root on every raw event
//! - Rule-ordered classification against the listing diff
//! - Rename pairing with a short grace period
//! - A single worker task owning all mutable state

pub mod classify;
pub mod config;
pub mod correlate;
pub mod enumerate;
pub mod error;
pub mod filter;
pub mod sink;
pub mod source;
pub mod worker;

pub use config::WatcherConfig;
pub use enumerate::{DirectoryLister, WalkLister};
pub use error::{Result, WatcherError};
pub use filter::PathFilter;
pub use monitor_core::SemanticEvent;
pub use sink::EventSink;

use classify::Classifier;
use notify::RecommendedWatcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::info;
use worker::Worker;

/// Watches one directory tree and delivers classified events to a sink
///
/// The OS subscription is established in [`Watcher::new`]; notifications
/// queue up until [`Watcher::start`] spawns the worker. A stopped watcher
/// cannot be restarted.
pub struct Watcher<S> {
    /// Canonical watched root
    root: PathBuf,
    lifecycle: Lifecycle<S>,
}

enum Lifecycle<S> {
    Ready {
        subscription: RecommendedWatcher,
        worker: Worker<S>,
    },
    Running {
        subscription: RecommendedWatcher,
        shutdown: oneshot::Sender<()>,
        handle: JoinHandle<()>,
    },
    Stopped,
}

impl<S: EventSink> Watcher<S> {
    /// Create a new watcher for the given path
    ///
    /// Fails if the root cannot be resolved, an ignore pattern is invalid,
    /// the OS subscription cannot be established, or the initial listing
    /// fails.
    pub fn new(path: impl AsRef<Path>, sink: S, config: WatcherConfig) -> Result<Self> {
        let path = path.as_ref();
        let root = std::fs::canonicalize(path).map_err(|source| WatcherError::InvalidRoot {
            root: path.to_path_buf(),
            source,
        })?;

        let filter = PathFilter::new(&root, &config.ignore_patterns)?;
        let lister = Arc::new(WalkLister::new(filter.clone()));
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));

        // Subscribe before the initial listing so nothing falls in between
        let subscription = source::subscribe(&root, tx.clone())?;
        let initial = lister.list(&root)?;

        info!(
            "Watcher ready for {} ({} entries, {} filter sources)",
            root.display(),
            initial.len(),
            filter.active_sources()
        );

        let worker = Worker::new(
            root.clone(),
            Classifier::new(root.clone(), filter),
            lister,
            initial,
            sink,
            (tx, rx),
        );

        Ok(Self {
            root,
            lifecycle: Lifecycle::Ready {
                subscription,
                worker,
            },
        })
    }

    /// Start delivering events
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Stopped) {
            Lifecycle::Ready {
                subscription,
                worker,
            } => {
                let (shutdown, shutdown_rx) = oneshot::channel();
                let handle = tokio::spawn(worker.run(shutdown_rx));
                self.lifecycle = Lifecycle::Running {
                    subscription,
                    shutdown,
                    handle,
                };
                Ok(())
            }
            running @ Lifecycle::Running { .. } => {
                self.lifecycle = running;
                Err(WatcherError::AlreadyStarted)
            }
            Lifecycle::Stopped => Err(WatcherError::Stopped),
        }
    }

    /// Alias for [`start`](Self::start)
    pub fn observe(&mut self) -> Result<()> {
        self.start()
    }
}

impl<S> Watcher<S> {
    /// Stop watching
    ///
    /// Waits for the worker to exit, then releases the OS subscription; once
    /// this returns no further event is classified or delivered.
    pub async fn stop(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Stopped) {
            Lifecycle::Running {
                subscription,
                shutdown,
                handle,
            } => {
                // Worker may already be gone if its queue closed
                let _ = shutdown.send(());
                let joined = handle.await;

                // Some backends join their event thread on drop. That thread
                // may be blocked on a full queue until the worker drops it.
                drop(subscription);

                joined?;
                info!("Watcher for {} stopped", self.root.display());
                Ok(())
            }
            Lifecycle::Ready { .. } | Lifecycle::Stopped => Ok(()),
        }
    }

    /// Canonical path of the watched root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running { .. })
    }
}

impl<S> Drop for Watcher<S> {
    fn drop(&mut self) {
        if let Lifecycle::Running { handle, .. } = &self.lifecycle {
            handle.abort();
        }
    }
}
