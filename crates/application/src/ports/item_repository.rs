//! Item storage port
//!
//! Defines the interface for persisting and retrieving catalog items.

use async_trait::async_trait;
use domain::{Item, ItemId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for catalog item persistence
///
/// Implementations provide their own synchronization; callers hold no locks
/// across these calls.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemRepositoryPort: Send + Sync {
    /// All stored items, in the store's natural order
    async fn get_all(&self) -> Result<Vec<Item>, ApplicationError>;

    /// Get an item by ID
    ///
    /// # Returns
    /// The item if present, `None` otherwise
    async fn get(&self, id: &ItemId) -> Result<Option<Item>, ApplicationError>;

    /// Store a new item
    ///
    /// Fails with `InvalidOperation` if an item with the same ID exists.
    async fn create(&self, item: &Item) -> Result<(), ApplicationError>;

    /// Replace a stored item
    ///
    /// Fails with `NotFound` if no item with that ID exists.
    async fn update(&self, item: &Item) -> Result<(), ApplicationError>;

    /// Remove an item
    ///
    /// Fails with `NotFound` if no item with that ID exists.
    async fn remove(&self, id: &ItemId) -> Result<(), ApplicationError>;
}
