//! Path snapshots of a watched directory tree

use ahash::AHashSet;
use std::path::{Component, Path, PathBuf};

/// File name of the Finder metadata file that is never reported
pub const METADATA_MARKER: &str = ".DS_Store";

/// Check whether the last component of `path` is the metadata marker
pub fn is_metadata_marker(path: &Path) -> bool {
    path.file_name()
        .map(|name| name == METADATA_MARKER)
        .unwrap_or(false)
}

/// Normalize a path for snapshot membership
///
/// Rebuilding from components drops trailing separators and `.` segments,
/// so `/root/dir/` and `/root/dir` compare equal.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// All non-hidden entries under the watched root at one instant
///
/// Paths are stored normalized and at most once. Metadata marker files are
/// rejected on insert, so a snapshot never contains one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSnapshot {
    paths: AHashSet<PathBuf>,
}

impl PathSnapshot {
    /// Create a new empty snapshot
    pub fn new() -> Self {
        Self {
            paths: AHashSet::new(),
        }
    }

    /// Insert a path, returning false if it was already present or filtered
    pub fn insert(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if is_metadata_marker(path) {
            return false;
        }
        self.paths.insert(normalize_path(path))
    }

    /// Check if the snapshot holds `path`
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Number of paths in the snapshot
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over the paths in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    /// Paths in lexicographic order (for display and stable output)
    pub fn sorted(&self) -> Vec<&PathBuf> {
        let mut paths: Vec<_> = self.paths.iter().collect();
        paths.sort();
        paths
    }

    /// Paths present here but missing from `other`
    pub fn difference<'a>(&'a self, other: &'a PathSnapshot) -> impl Iterator<Item = &'a PathBuf> {
        self.paths.difference(&other.paths)
    }
}

impl<P: AsRef<Path>> FromIterator<P> for PathSnapshot {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for path in iter {
            snapshot.insert(path);
        }
        snapshot
    }
}

impl<P: AsRef<Path>> Extend<P> for PathSnapshot {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for path in iter {
            self.insert(path);
        }
    }
}
