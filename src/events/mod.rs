// Event system foundation: lifecycle event publishing over a broadcast channel

pub mod publisher;

pub use publisher::{EventPublisher, LifecycleEvent};
