//! In-process event fan-out over a tokio broadcast channel

use application::error::ApplicationError;
use application::ports::EventPublisherPort;
use async_trait::async_trait;
use domain::CatalogEvent;
use tokio::sync::broadcast;
use tracing::{debug, instrument};

/// Default number of events buffered per subscriber
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Publishes catalog events to every live subscriber
///
/// Slow subscribers that fall more than `capacity` events behind observe a
/// `Lagged` error on their receiver and skip ahead.
#[derive(Debug, Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<CatalogEvent>,
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl BroadcastEventPublisher {
    /// Create a publisher buffering up to `capacity` events (at least one)
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl EventPublisherPort for BroadcastEventPublisher {
    #[instrument(skip(self, event), fields(item_id = %event.item_id()))]
    async fn publish(&self, event: &CatalogEvent) -> Result<(), ApplicationError> {
        match self.sender.send(event.clone()) {
            Ok(receivers) => debug!(receivers, "Published catalog event"),
            Err(_) => debug!("No subscribers for catalog event"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use domain::{Item, ItemDetails, ItemId, Price};

    use super::*;

    fn sample_item() -> Item {
        Item::new(ItemDetails::new("Potion", "Heals", Price::ZERO).unwrap())
    }

    #[tokio::test]
    async fn publish_without_subscribers_succeeds() {
        let publisher = BroadcastEventPublisher::default();
        assert_eq!(publisher.receiver_count(), 0);
        publisher
            .publish(&CatalogEvent::deleted(ItemId::new()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn subscribers_receive_events_in_order() {
        let publisher = BroadcastEventPublisher::new(8);
        let mut receiver = publisher.subscribe();
        let item = sample_item();

        publisher.publish(&CatalogEvent::created(&item)).await.unwrap();
        publisher
            .publish(&CatalogEvent::deleted(item.id()))
            .await
            .unwrap();

        assert_eq!(receiver.recv().await.unwrap(), CatalogEvent::created(&item));
        assert_eq!(
            receiver.recv().await.unwrap(),
            CatalogEvent::deleted(item.id())
        );
    }

    #[tokio::test]
    async fn every_subscriber_gets_a_copy() {
        let publisher = BroadcastEventPublisher::new(4);
        let mut first = publisher.subscribe();
        let mut second = publisher.subscribe();
        assert_eq!(publisher.receiver_count(), 2);

        let event = CatalogEvent::updated(&sample_item());
        publisher.publish(&event).await.unwrap();

        assert_eq!(first.recv().await.unwrap(), event);
        assert_eq!(second.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn zero_capacity_is_clamped() {
        let publisher = BroadcastEventPublisher::new(0);
        let mut receiver = publisher.subscribe();
        let event = CatalogEvent::deleted(ItemId::new());
        publisher.publish(&event).await.unwrap();
        assert_eq!(receiver.recv().await.unwrap(), event);
    }
}
