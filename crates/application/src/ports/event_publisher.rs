//! Catalog event publishing port

use async_trait::async_trait;
use domain::CatalogEvent;
#[cfg(test)]
use mockall::automock;
use tracing::trace;

use crate::error::ApplicationError;

/// Port for publishing catalog events to interested consumers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    /// Publish a single event
    async fn publish(&self, event: &CatalogEvent) -> Result<(), ApplicationError>;
}

/// Publisher that accepts and drops every event
///
/// Used when event publication is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisherPort for NoopEventPublisher {
    async fn publish(&self, event: &CatalogEvent) -> Result<(), ApplicationError> {
        trace!(event = event.name(), item_id = %event.item_id(), "Dropping event (no publisher)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use domain::ItemId;

    use super::*;

    #[tokio::test]
    async fn noop_publisher_accepts_events() {
        let publisher = NoopEventPublisher;
        let result = publisher.publish(&CatalogEvent::deleted(ItemId::new())).await;
        assert!(result.is_ok());
    }
}
