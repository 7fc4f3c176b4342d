//! OS event subscription (notify)
//!
//! Translates `notify` events into raw events, one per reported path, and
//! feeds them into the worker queue in the order they were reported.

use crate::error::{Result, WatcherError};
use crate::worker::WorkerMsg;
use monitor_core::{EventFlags, RawEvent};
use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{trace, warn};

/// Subscribe to raw events under `root`
///
/// Events start flowing into `tx` immediately; they queue up until the
/// worker is started. Dropping the returned watcher ends the subscription.
pub fn subscribe(root: &Path, tx: mpsc::Sender<WorkerMsg>) -> Result<RecommendedWatcher> {
    let subscription_error = |source| WatcherError::Subscription {
        root: root.to_path_buf(),
        source,
    };

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(event) => {
                if event.need_rescan() {
                    warn!("Event source dropped events, next listing will catch up");
                }
                for raw in translate(&event) {
                    if tx.blocking_send(WorkerMsg::Raw(raw)).is_err() {
                        return; // worker gone
                    }
                }
            }
            Err(e) => warn!("notify error: {}", e),
        }
    })
    .map_err(subscription_error)?;

    watcher
        .watch(root, RecursiveMode::Recursive)
        .map_err(subscription_error)?;

    Ok(watcher)
}

/// Convert one notify event into raw events
pub fn translate(event: &notify::Event) -> Vec<RawEvent> {
    let Some(flags) = flags_for(&event.kind) else {
        trace!("Dropping notify event {:?}", event.kind);
        return vec![];
    };

    event
        .paths
        .iter()
        .map(|path| {
            let mut flags = flags;
            // Rename notifications do not say what was renamed
            if flags.renamed && path.is_dir() {
                flags.renamed = false;
                flags.dir_renamed = true;
            }
            RawEvent::new(path, flags)
        })
        .collect()
}

fn flags_for(kind: &EventKind) -> Option<EventFlags> {
    let mut flags = EventFlags::default();
    match kind {
        EventKind::Create(CreateKind::Folder) => flags.dir_created = true,
        EventKind::Create(_) => flags.created = true,
        EventKind::Remove(RemoveKind::Folder) => flags.dir_removed = true,
        EventKind::Remove(_) => flags.removed = true,
        // inotify also reports each half separately as From/To
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => return None,
        EventKind::Modify(ModifyKind::Name(_)) => flags.renamed = true,
        EventKind::Modify(ModifyKind::Data(_)) => flags.modified = true,
        EventKind::Modify(_) | EventKind::Any | EventKind::Other => flags.generic_change = true,
        EventKind::Access(_) => return None,
    }
    Some(flags)
}
