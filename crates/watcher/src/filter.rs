//! Path exclusion rules
//!
//! Two sources of exclusions:
//! 1. Built-in: the metadata marker file (always), hidden entries (listings only)
//! 2. Config-based gitignore-style patterns, relative to the watched root

use crate::error::{Result, WatcherError};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use monitor_core::is_metadata_marker;
use std::path::{Path, PathBuf};

/// Exclusion rules for one watched root
#[derive(Debug, Clone)]
pub struct PathFilter {
    /// Watched root (canonical)
    root: PathBuf,

    /// Compiled config patterns
    patterns: Gitignore,
}

impl PathFilter {
    /// Compile `patterns` relative to `root`
    pub fn new(root: &Path, patterns: &[String]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .map_err(|source| WatcherError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }
        let patterns = builder.build().map_err(|source| WatcherError::Pattern {
            pattern: patterns.join(", "),
            source,
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            patterns,
        })
    }

    /// Filter with built-in rules only
    pub fn builtin(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            patterns: Gitignore::empty(),
        }
    }

    /// Check if `path` is excluded from classification
    ///
    /// Hidden entries are not excluded here: a raw event for a hidden file
    /// is classified like any other and simply never shows up in a listing.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if is_metadata_marker(path) {
            return true;
        }
        if self.patterns.is_empty() {
            return false;
        }

        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }

        self.patterns
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }

    /// Check if any config patterns are compiled
    pub fn has_patterns(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// Check if a listing entry should be left out (with its subtree)
    pub fn excludes_entry(&self, path: &Path, is_dir: bool) -> bool {
        is_hidden(path) || self.is_ignored(path, is_dir)
    }

    /// Number of active rule sources
    pub fn active_sources(&self) -> usize {
        if self.has_patterns() {
            2
        } else {
            1
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Dot-prefixed file name
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
