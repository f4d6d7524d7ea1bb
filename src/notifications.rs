//! # Notification Collaborator
//!
//! Fire-and-forget delivery of human-facing messages (new slots, confirmed
//! meetings, claim announcements). Delivery runs on a spawned task and a
//! failed send is logged and dropped; it must never block or fail the
//! workflow operation that triggered it.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Outbound notification channel. Implementations wrap whatever transport
/// the deployment uses (bot, mail, webhook).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: i64, message: String) -> Result<(), NotifyError>;
}

/// Error type for notification delivery
#[derive(Debug, thiserror::Error)]
#[error("notification to user {user_id} failed: {message}")]
pub struct NotifyError {
    pub user_id: i64,
    pub message: String,
}

/// Default notifier: logs the message at debug level and always succeeds
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, user_id: i64, message: String) -> Result<(), NotifyError> {
        tracing::debug!(user_id, %message, "notification");
        Ok(())
    }
}

/// Deliver a notification without awaiting the outcome.
/// Failures surface as warnings only.
pub fn notify_detached(notifier: Arc<dyn Notifier>, user_id: i64, message: String) {
    tokio::spawn(async move {
        if let Err(error) = notifier.notify(user_id, message).await {
            warn!(user_id, %error, "notification delivery failed");
        }
    });
}
