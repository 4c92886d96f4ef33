//! Completion notice consumers.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::message::Notification;

/// Receives run completion notices.
///
/// Delivery is fire-and-forget: implementations must not fail the run, and
/// the controller never waits on an acknowledgement.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: Notification);
}

#[async_trait]
impl NotificationSink for mpsc::UnboundedSender<Notification> {
    async fn notify(&self, notification: Notification) {
        let _ = self.send(notification);
    }
}
