use serde_json::Value;
use tokio::sync::broadcast;

/// A workflow lifecycle event as seen by subscribers
#[derive(Debug, Clone)]
pub struct LifecycleEvent {
    /// One of the names in [`crate::constants::events`]
    pub name: &'static str,
    pub context: Value,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

/// Broadcast publisher for workflow lifecycle events.
///
/// Publishing never fails: events sent while nobody subscribes are dropped,
/// and slow subscribers observe lag through the broadcast channel itself.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<LifecycleEvent>,
}

impl EventPublisher {
    /// Create a publisher with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a lifecycle event to all current subscribers
    pub fn publish(&self, name: &'static str, context: Value) {
        let event = LifecycleEvent {
            name,
            context,
            published_at: chrono::Utc::now(),
        };
        // send() errs only when no receiver exists, which is fine here
        let _ = self.sender.send(event);
    }

    /// Subscribe to events published from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(1000)
    }
}
