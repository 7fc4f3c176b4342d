//! Raw event classification
//!
//! Maps one raw event, the change set it produced and the rename pairing
//! state to at most one semantic event:
//!
//! ```text
//! RawEvent + ChangeSet + PairingState → Decision { event, next, commit }
//! ```
//!
//! Flags are not mutually exclusive, so the rules are evaluated in a fixed
//! priority order and the first rule whose flags match decides the outcome.

use crate::correlate::PairingState;
use crate::filter::PathFilter;
use monitor_core::{is_metadata_marker, ChangeSet, RawEvent, SemanticEvent};
use std::path::{Path, PathBuf};

/// Classification rules in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// removed / dirRemoved
    Removal,
    /// renamed / dirRenamed
    Rename,
    /// created / dirCreated
    Creation,
    /// modified / dirModified / genericChange
    Modification,
}

impl Rule {
    pub const PRIORITY: [Rule; 4] = [Rule::Removal, Rule::Rename, Rule::Creation, Rule::Modification];

    /// Highest-priority rule whose flags are set on `event`
    pub fn select(event: &RawEvent) -> Option<Rule> {
        Self::PRIORITY.into_iter().find(|rule| rule.matches(event))
    }

    fn matches(self, event: &RawEvent) -> bool {
        let flags = &event.flags;
        match self {
            Rule::Removal => flags.is_removal(),
            Rule::Rename => flags.is_rename(),
            Rule::Creation => flags.is_creation(),
            Rule::Modification => flags.is_modification(),
        }
    }
}

/// What to do with the freshly taken snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// Leave the store untouched (event abandoned)
    Skip,
    /// Store the new snapshot now
    Now,
    /// Hold the new snapshot until the rename pair resolves or lapses
    Deferred,
}

/// Outcome of classifying one raw event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Semantic event to emit, if any
    pub event: Option<SemanticEvent>,
    /// Pairing state after this event
    pub next: PairingState,
    pub commit: Commit,
    /// Rule that decided the outcome (None for unflagged events)
    pub rule: Option<Rule>,
}

impl Decision {
    /// No emission, no state change
    fn skip(state: PairingState, rule: Option<Rule>) -> Self {
        Self {
            event: None,
            next: state,
            commit: Commit::Skip,
            rule,
        }
    }

    /// Emit `event`, clear any pending pairing, commit
    fn emit(event: SemanticEvent, rule: Rule) -> Self {
        Self {
            event: Some(event),
            next: PairingState::Idle,
            commit: Commit::Now,
            rule: Some(rule),
        }
    }

    /// Commit without emitting
    fn settle(state: PairingState, rule: Option<Rule>) -> Self {
        Self {
            event: None,
            next: state,
            commit: Commit::Now,
            rule,
        }
    }
}

/// Stateless classifier for one watched root
#[derive(Debug, Clone)]
pub struct Classifier {
    root: PathBuf,
    filter: PathFilter,
}

impl Classifier {
    pub fn new(root: impl Into<PathBuf>, filter: PathFilter) -> Self {
        Self {
            root: root.into(),
            filter,
        }
    }

    /// Early exits, checked before any enumeration is done
    ///
    /// Metadata marker files, configured ignore patterns and the watched
    /// root itself never produce an event or touch any state. The file system
    /// is only consulted when patterns are configured.
    pub fn is_filtered(&self, path: &Path) -> bool {
        if path == self.root || is_metadata_marker(path) {
            return true;
        }
        self.filter.has_patterns() && self.filter.is_ignored(path, path.is_dir())
    }

    /// Decide the outcome for `event`
    ///
    /// Pure; `event` is expected to have passed [`is_filtered`](Self::is_filtered).
    pub fn classify(&self, event: &RawEvent, changes: &ChangeSet, state: PairingState) -> Decision {
        let path = &event.path;
        let Some(rule) = Rule::select(event) else {
            return Decision::settle(state, None);
        };

        match rule {
            Rule::Removal => {
                if !changes.is_removed(path) {
                    return Decision::skip(state, Some(rule));
                }
                Decision::emit(SemanticEvent::Deleted(path.clone()), rule)
            }
            Rule::Rename => {
                // A rename arrives as two notifications; either half may be
                // the one that appeared or disappeared.
                let event = if changes.is_added(path) {
                    Some(SemanticEvent::Added(path.clone()))
                } else if changes.is_removed(path) {
                    Some(SemanticEvent::Deleted(path.clone()))
                } else {
                    None
                };

                match state {
                    PairingState::Idle => Decision {
                        event,
                        next: PairingState::AwaitingPair,
                        commit: Commit::Deferred,
                        rule: Some(rule),
                    },
                    PairingState::AwaitingPair => Decision {
                        event,
                        next: PairingState::Idle,
                        commit: Commit::Now,
                        rule: Some(rule),
                    },
                }
            }
            Rule::Creation => {
                if !changes.is_added(path) {
                    return Decision::skip(state, Some(rule));
                }
                Decision::emit(SemanticEvent::Added(path.clone()), rule)
            }
            Rule::Modification => {
                if changes.net_count() != 0 {
                    // Side effect of a create/delete handled elsewhere
                    return Decision::settle(state, Some(rule));
                }
                Decision::emit(SemanticEvent::Changed(path.clone()), rule)
            }
        }
    }
}
