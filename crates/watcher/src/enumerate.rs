//! Directory enumeration
//!
//! Full re-scan of the watched root, producing the snapshot every raw event
//! is diffed against.

use crate::error::{Result, WatcherError};
use crate::filter::PathFilter;
use monitor_core::PathSnapshot;
use std::io;
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

/// Produces the current listing of a watched root
///
/// Called from tokio's blocking pool, once per raw event.
pub trait DirectoryLister: Send + Sync + 'static {
    fn list(&self, root: &Path) -> Result<PathSnapshot>;
}

/// Recursive walkdir-based lister
pub struct WalkLister {
    filter: PathFilter,
}

impl WalkLister {
    pub fn new(filter: PathFilter) -> Self {
        Self { filter }
    }
}

impl DirectoryLister for WalkLister {
    fn list(&self, root: &Path) -> Result<PathSnapshot> {
        let mut snapshot = PathSnapshot::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !self.filter.excludes_entry(e.path(), e.file_type().is_dir()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Entries may vanish while the walk is in progress
                    if err.depth() > 0 && is_not_found(&err) {
                        trace!("Skipping vanished entry: {:?}", err.path());
                        continue;
                    }
                    return Err(WatcherError::enumeration(root, io::Error::from(err)));
                }
            };
            snapshot.insert(entry.path());
        }

        Ok(snapshot)
    }
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .map(|e| e.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}
