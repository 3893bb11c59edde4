//! Catalog Service - create, read, update and delete catalog items

use std::sync::Arc;

use domain::{CatalogEvent, Item, ItemDetails, ItemId};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{EventPublisherPort, ItemRepositoryPort, NoopEventPublisher},
};

/// Service for managing the item catalog
///
/// Every successful mutation is followed by one event on the configured
/// publisher. Store and publisher failures are returned to the caller as-is.
pub struct CatalogService {
    repository: Arc<dyn ItemRepositoryPort>,
    publisher: Arc<dyn EventPublisherPort>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    /// Create a catalog service that does not publish events
    pub fn new(repository: Arc<dyn ItemRepositoryPort>) -> Self {
        Self::with_publisher(repository, Arc::new(NoopEventPublisher))
    }

    /// Create a catalog service that publishes events after each mutation
    pub fn with_publisher(
        repository: Arc<dyn ItemRepositoryPort>,
        publisher: Arc<dyn EventPublisherPort>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// List all items
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, ApplicationError> {
        let items = self.repository.get_all().await?;
        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    /// Get a single item
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn get_item(&self, id: &ItemId) -> Result<Item, ApplicationError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Create a new item and publish `ItemCreated`
    #[instrument(skip(self, details), fields(name = %details.name()))]
    pub async fn create_item(&self, details: ItemDetails) -> Result<Item, ApplicationError> {
        let item = Item::new(details);
        self.repository.create(&item).await?;

        info!(item_id = %item.id(), "Item created");

        self.publisher.publish(&CatalogEvent::created(&item)).await?;
        Ok(item)
    }

    /// Replace the details of an existing item and publish `ItemUpdated`
    #[instrument(skip(self, details), fields(item_id = %id))]
    pub async fn update_item(
        &self,
        id: &ItemId,
        details: ItemDetails,
    ) -> Result<Item, ApplicationError> {
        let mut item = self.get_item(id).await?;
        item.revise(details);
        self.repository.update(&item).await?;

        info!("Item updated");

        self.publisher.publish(&CatalogEvent::updated(&item)).await?;
        Ok(item)
    }

    /// Remove an item and publish `ItemDeleted`
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete_item(&self, id: &ItemId) -> Result<(), ApplicationError> {
        let item = self.get_item(id).await?;
        self.repository.remove(&item.id()).await?;

        info!("Item deleted");

        self.publisher.publish(&CatalogEvent::deleted(*id)).await?;
        Ok(())
    }
}

fn not_found(id: &ItemId) -> ApplicationError {
    ApplicationError::NotFound(format!("Item {id}"))
}
