//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod event_publisher;
mod item_repository;

#[cfg(test)]
pub use event_publisher::MockEventPublisherPort;
pub use event_publisher::{EventPublisherPort, NoopEventPublisher};
#[cfg(test)]
pub use item_repository::MockItemRepositoryPort;
pub use item_repository::ItemRepositoryPort;
