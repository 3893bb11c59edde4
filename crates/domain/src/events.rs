//! Catalog events published after successful mutations

use serde::{Deserialize, Serialize};

use crate::{entities::Item, value_objects::ItemId};

/// Notification that the catalog changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum CatalogEvent {
    /// An item was created
    ItemCreated {
        id: ItemId,
        name: String,
        description: String,
    },
    /// An item's name, description or price changed
    ItemUpdated {
        id: ItemId,
        name: String,
        description: String,
    },
    /// An item was removed
    ItemDeleted { id: ItemId },
}

impl CatalogEvent {
    pub fn created(item: &Item) -> Self {
        Self::ItemCreated {
            id: item.id(),
            name: item.name().to_string(),
            description: item.description().to_string(),
        }
    }

    pub fn updated(item: &Item) -> Self {
        Self::ItemUpdated {
            id: item.id(),
            name: item.name().to_string(),
            description: item.description().to_string(),
        }
    }

    pub const fn deleted(id: ItemId) -> Self {
        Self::ItemDeleted { id }
    }

    /// The item the event refers to
    pub const fn item_id(&self) -> ItemId {
        match self {
            Self::ItemCreated { id, .. } | Self::ItemUpdated { id, .. } | Self::ItemDeleted { id } => {
                *id
            },
        }
    }

    /// Short event name, used in logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ItemCreated { .. } => "ItemCreated",
            Self::ItemUpdated { .. } => "ItemUpdated",
            Self::ItemDeleted { .. } => "ItemDeleted",
        }
    }
}
