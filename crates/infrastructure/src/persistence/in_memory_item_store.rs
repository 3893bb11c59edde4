//! In-memory item store
//!
//! Implements `ItemRepositoryPort` over a vector guarded by an async
//! read-write lock. Items are listed in insertion order.

use application::error::ApplicationError;
use application::ports::ItemRepositoryPort;
use async_trait::async_trait;
use domain::{Item, ItemId};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Process-local item storage
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `items`
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

fn missing(id: &ItemId) -> ApplicationError {
    ApplicationError::NotFound(format!("Item {id}"))
}

#[async_trait]
impl ItemRepositoryPort for InMemoryItemStore {
    async fn get_all(&self) -> Result<Vec<Item>, ApplicationError> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, ApplicationError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .find(|item| item.id() == *id)
            .cloned())
    }

    #[instrument(skip(self, item), fields(item_id = %item.id()))]
    async fn create(&self, item: &Item) -> Result<(), ApplicationError> {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id() == item.id()) {
            return Err(ApplicationError::InvalidOperation(format!(
                "Item {} already exists",
                item.id()
            )));
        }
        items.push(item.clone());
        debug!(count = items.len(), "Stored item");
        Ok(())
    }

    #[instrument(skip(self, item), fields(item_id = %item.id()))]
    async fn update(&self, item: &Item) -> Result<(), ApplicationError> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|existing| existing.id() == item.id())
            .ok_or_else(|| missing(&item.id()))?;
        *slot = item.clone();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &ItemId) -> Result<(), ApplicationError> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|existing| existing.id() == *id)
            .ok_or_else(|| missing(id))?;
        items.remove(index);
        Ok(())
    }
}
