//! Snapshot differencing

use crate::snapshot::PathSnapshot;
use ahash::AHashSet;
use std::path::{Path, PathBuf};

/// Paths that appeared and disappeared between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Paths in the new snapshot but not the old one
    pub added: AHashSet<PathBuf>,
    /// Paths in the old snapshot but not the new one
    pub removed: AHashSet<PathBuf>,
}

impl ChangeSet {
    /// Compute the changes from `old` to `new`
    ///
    /// `added = new - old`, `removed = old - new`. Pure; any pair of
    /// snapshots (including empty ones) is valid input.
    pub fn between(old: &PathSnapshot, new: &PathSnapshot) -> Self {
        Self {
            added: new.difference(old).cloned().collect(),
            removed: old.difference(new).cloned().collect(),
        }
    }

    /// Check if `path` appeared
    pub fn is_added(&self, path: &Path) -> bool {
        self.added.contains(path)
    }

    /// Check if `path` disappeared
    pub fn is_removed(&self, path: &Path) -> bool {
        self.removed.contains(path)
    }

    /// `added.len() - removed.len()`
    ///
    /// Zero means the listing did not grow or shrink, which is how a pure
    /// content change is told apart from the side effect of a create/delete.
    pub fn net_count(&self) -> isize {
        self.added.len() as isize - self.removed.len() as isize
    }

    /// Check if there are any changes
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Shorthand for [`ChangeSet::between`]
pub fn diff(old: &PathSnapshot, new: &PathSnapshot) -> ChangeSet {
    ChangeSet::between(old, new)
}
