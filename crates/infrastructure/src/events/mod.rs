//! Event publishing adapters

mod broadcast_publisher;

pub use broadcast_publisher::{BroadcastEventPublisher, DEFAULT_CHANNEL_CAPACITY};
