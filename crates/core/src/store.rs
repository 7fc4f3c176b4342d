//! Last-known-good snapshot of the watched root

use crate::snapshot::PathSnapshot;

/// Holds the single snapshot every new listing is diffed against
///
/// No validation: any snapshot is accepted, including the empty one
/// (root not created yet, or just removed).
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    /// Current snapshot
    current: PathSnapshot,
    /// Number of commits since creation
    revision: u64,
}

impl SnapshotStore {
    /// Create a store seeded with an initial listing
    pub fn new(initial: PathSnapshot) -> Self {
        Self {
            current: initial,
            revision: 0,
        }
    }

    /// Get the stored snapshot
    pub fn get(&self) -> &PathSnapshot {
        &self.current
    }

    /// Replace the stored snapshot
    pub fn set(&mut self, snapshot: PathSnapshot) {
        self.current = snapshot;
        self.revision += 1;
    }

    /// Number of times [`set`](Self::set) has been called
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
