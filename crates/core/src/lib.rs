//! Data model for the file monitor
//!
//! This crate provides:
//! - Path snapshots of a watched tree (normalized, metadata marker excluded)
//! - Snapshot differencing into added/removed change sets
//! - The snapshot store holding the last-known-good listing
//! - Raw OS event and semantic event types

pub mod diff;
pub mod event;
pub mod snapshot;
pub mod store;

// Re-exports
pub use diff::{diff, ChangeSet};
pub use event::{EventFlags, RawEvent, SemanticEvent};
pub use snapshot::{is_metadata_marker, normalize_path, PathSnapshot, METADATA_MARKER};
pub use store::SnapshotStore;
