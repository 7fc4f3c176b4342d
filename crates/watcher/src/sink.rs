//! Delivery of classified events

use async_trait::async_trait;
use monitor_core::SemanticEvent;
use tokio::sync::mpsc;
use tracing::debug;

/// Receives classified events, at most one per raw event
#[async_trait]
pub trait EventSink: Send + 'static {
    async fn on_change(&mut self, event: SemanticEvent);
}

#[async_trait]
impl EventSink for mpsc::Sender<SemanticEvent> {
    async fn on_change(&mut self, event: SemanticEvent) {
        if let Err(e) = self.send(event).await {
            debug!("Event receiver dropped, discarding {}", e.0);
        }
    }
}

#[async_trait]
impl EventSink for mpsc::UnboundedSender<SemanticEvent> {
    async fn on_change(&mut self, event: SemanticEvent) {
        if let Err(e) = self.send(event) {
            debug!("Event receiver dropped, discarding {}", e.0);
        }
    }
}
