//! Rename pairing
//!
//! OS event sources may report a rename as two uncorrelated notifications
//! (old path, then new path). The first half opens a pairing and holds back
//! its snapshot so the second half is still diffed against the listing from
//! before the rename. The pairing closes when the second half arrives or
//! when the grace period lapses, whichever is dequeued first.
//!
//! Any two consecutive rename notifications are treated as a pair; paths are
//! not compared, so two unrelated renames landing together can pair up.

use monitor_core::PathSnapshot;
use std::time::Duration;
use tracing::debug;

/// How long a first rename half waits for its partner
pub const RENAME_GRACE: Duration = Duration::from_millis(50);

/// Whether a rename pairing is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PairingState {
    #[default]
    Idle,
    AwaitingPair,
}

/// Identifies one pairing opening; expiries for older tickets are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Owns the pairing flag and the snapshot held back by a first rename half
#[derive(Debug, Default)]
pub struct RenameCorrelator {
    state: PairingState,
    /// Snapshot to commit if the pairing lapses
    pending: Option<PathSnapshot>,
    /// Ticket of the most recent opening
    generation: u64,
}

impl RenameCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PairingState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == PairingState::AwaitingPair
    }

    /// Open a pairing, holding back `snapshot` until it resolves
    pub fn open(&mut self, snapshot: PathSnapshot) -> Ticket {
        self.generation += 1;
        self.state = PairingState::AwaitingPair;
        self.pending = Some(snapshot);
        debug!("Rename pairing opened (ticket {})", self.generation);
        Ticket(self.generation)
    }

    /// Record an immediate commit and move to `next`
    ///
    /// Any held-back snapshot is older than the one just committed, so it is
    /// dropped either way. If the pairing stays open, a later lapse only
    /// clears the flag.
    pub fn settle(&mut self, next: PairingState) {
        if self.state == PairingState::AwaitingPair && next == PairingState::Idle {
            debug!("Rename pairing resolved (ticket {})", self.generation);
        }
        self.state = next;
        self.pending = None;
    }

    /// Grace period for `ticket` elapsed
    ///
    /// Returns the held-back snapshot to commit, if the pairing is still the
    /// one `ticket` opened and nothing newer has been committed since.
    pub fn expire(&mut self, ticket: Ticket) -> Option<PathSnapshot> {
        if ticket.0 != self.generation || !self.is_awaiting() {
            return None;
        }
        debug!("Rename pairing lapsed (ticket {})", ticket.0);
        self.state = PairingState::Idle;
        self.pending.take()
    }
}
