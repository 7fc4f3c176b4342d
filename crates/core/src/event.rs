//! Raw and semantic file-change events

use crate::snapshot::normalize_path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Flags attached to a raw OS notification
///
/// Flags are independent; a single notification may carry several
/// (FSEvents coalesces e.g. renamed + modified).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFlags {
    pub created: bool,
    pub removed: bool,
    pub renamed: bool,
    pub modified: bool,
    pub dir_created: bool,
    pub dir_removed: bool,
    pub dir_renamed: bool,
    pub dir_modified: bool,
    pub generic_change: bool,
}

impl EventFlags {
    /// File or directory removal
    pub fn is_removal(&self) -> bool {
        self.removed || self.dir_removed
    }

    /// File or directory rename (either half)
    pub fn is_rename(&self) -> bool {
        self.renamed || self.dir_renamed
    }

    /// File or directory creation
    pub fn is_creation(&self) -> bool {
        self.created || self.dir_created
    }

    /// Content, directory or unspecified change
    pub fn is_modification(&self) -> bool {
        self.modified || self.dir_modified || self.generic_change
    }

    /// No flag set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One notification from the OS event source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// Absolute, normalized path the notification refers to
    pub path: PathBuf,
    pub flags: EventFlags,
}

impl RawEvent {
    pub fn new(path: impl AsRef<Path>, flags: EventFlags) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            flags,
        }
    }

    pub fn created(path: impl AsRef<Path>) -> Self {
        Self::new(path, EventFlags { created: true, ..Default::default() })
    }

    pub fn removed(path: impl AsRef<Path>) -> Self {
        Self::new(path, EventFlags { removed: true, ..Default::default() })
    }

    pub fn renamed(path: impl AsRef<Path>) -> Self {
        Self::new(path, EventFlags { renamed: true, ..Default::default() })
    }

    pub fn modified(path: impl AsRef<Path>) -> Self {
        Self::new(path, EventFlags { modified: true, ..Default::default() })
    }
}

/// Classified change delivered to the sink
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum SemanticEvent {
    Added(PathBuf),
    Changed(PathBuf),
    Deleted(PathBuf),
}

impl SemanticEvent {
    /// Path the event refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::Added(path) | Self::Changed(path) | Self::Deleted(path) => path,
        }
    }

    /// Lowercase name of the variant
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Changed(_) => "changed",
            Self::Deleted(_) => "deleted",
        }
    }
}

impl fmt::Display for SemanticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.path().display())
    }
}
