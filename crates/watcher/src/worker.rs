//! Event-processing worker
//!
//! One task owns the snapshot store, the rename correlator and the
//! classifier. Raw events and deferred commits arrive on the same queue, so
//! a lapsing rename pairing and the arrival of its second half can never
//! interleave: whichever is dequeued first wins.
//!
//! ```text
//! notify → WorkerMsg::Raw ──┐
//!                           ├→ queue → Worker → EventSink
//! timer → DeferredCommit ───┘
//! ```

use crate::classify::{Classifier, Commit};
use crate::correlate::{RenameCorrelator, Ticket, RENAME_GRACE};
use crate::enumerate::DirectoryLister;
use crate::error::Result;
use crate::sink::EventSink;
use monitor_core::{ChangeSet, PathSnapshot, RawEvent, SnapshotStore};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn};

/// Messages processed by the worker, strictly one at a time
#[derive(Debug)]
pub enum WorkerMsg {
    /// Notification from the OS event source
    Raw(RawEvent),
    /// Grace period of a rename pairing elapsed
    DeferredCommit(Ticket),
}

pub(crate) struct Worker<S> {
    root: PathBuf,
    classifier: Classifier,
    store: SnapshotStore,
    correlator: RenameCorrelator,
    lister: Arc<dyn DirectoryLister>,
    sink: S,
    rx: mpsc::Receiver<WorkerMsg>,
    /// Used to re-inject deferred commits
    tx: mpsc::Sender<WorkerMsg>,
}

impl<S: EventSink> Worker<S> {
    pub(crate) fn new(
        root: PathBuf,
        classifier: Classifier,
        lister: Arc<dyn DirectoryLister>,
        initial: PathSnapshot,
        sink: S,
        channel: (mpsc::Sender<WorkerMsg>, mpsc::Receiver<WorkerMsg>),
    ) -> Self {
        let (tx, rx) = channel;
        Self {
            root,
            classifier,
            store: SnapshotStore::new(initial),
            correlator: RenameCorrelator::new(),
            lister,
            sink,
            rx,
            tx,
        }
    }

    /// Process messages until `shutdown` fires or the queue closes
    ///
    /// Shutdown is checked before and while each message is handled; once it
    /// fires no further classification happens.
    pub(crate) async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        info!(
            "Watching {} ({} entries)",
            self.root.display(),
            self.store.get().len()
        );

        loop {
            let msg = tokio::select! {
                biased;
                _ = &mut shutdown => break,
                msg = self.rx.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
            };

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = self.handle(msg) => {}
            }
        }

        info!("Stopped watching {}", self.root.display());
    }

    pub(crate) async fn handle(&mut self, msg: WorkerMsg) {
        match msg {
            WorkerMsg::Raw(event) => self.process(event).await,
            WorkerMsg::DeferredCommit(ticket) => {
                if let Some(snapshot) = self.correlator.expire(ticket) {
                    self.store.set(snapshot);
                }
            }
        }
    }

    async fn process(&mut self, event: RawEvent) {
        if self.classifier.is_filtered(&event.path) {
            trace!("Ignoring event for {}", event.path.display());
            return;
        }

        let fresh = match self.list().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Next event re-diffs against the last stored snapshot
                warn!("Skipping event for {}: {}", event.path.display(), e);
                return;
            }
        };

        let changes = ChangeSet::between(self.store.get(), &fresh);
        let decision = self
            .classifier
            .classify(&event, &changes, self.correlator.state());

        trace!(
            "{} {:?} -> {:?} (+{} -{})",
            event.path.display(),
            decision.rule,
            decision.commit,
            changes.added.len(),
            changes.removed.len()
        );

        if let Some(semantic) = decision.event {
            debug!("{}", semantic);
            self.sink.on_change(semantic).await;
        }

        match decision.commit {
            Commit::Skip => {}
            Commit::Now => {
                self.correlator.settle(decision.next);
                self.store.set(fresh);
            }
            Commit::Deferred => {
                let ticket = self.correlator.open(fresh);
                self.schedule_commit(ticket);
            }
        }
    }

    /// Enumerate the root off the worker task
    ///
    /// The returned future does not borrow the worker, so `run` stays `Send`
    /// for sinks that are not `Sync`.
    fn list(&self) -> impl Future<Output = Result<PathSnapshot>> + Send + 'static {
        let lister = Arc::clone(&self.lister);
        let root = self.root.clone();
        async move { tokio::task::spawn_blocking(move || lister.list(&root)).await? }
    }

    fn schedule_commit(&self, ticket: Ticket) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(RENAME_GRACE).await;
            // Fails only once the worker is gone
            let _ = tx.send(WorkerMsg::DeferredCommit(ticket)).await;
        });
    }
}
