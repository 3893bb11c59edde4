//! Catalog item entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainError,
    value_objects::{ItemId, Price},
};

/// Maximum length of an item name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// The mutable part of a catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    name: String,
    description: String,
    price: Price,
}

impl ItemDetails {
    /// Create validated item details
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the name is blank or longer
    /// than [`MAX_NAME_LENGTH`] characters.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "name must not be blank".to_string(),
            ));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::ValidationError(format!(
                "name must be at most {MAX_NAME_LENGTH} characters"
            )));
        }
        Ok(Self {
            name,
            description: description.into(),
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn price(&self) -> Price {
        self.price
    }
}

/// A catalog entry
///
/// `id` and `created_date` are fixed when the item is created; only the
/// [`ItemDetails`] can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    details: ItemDetails,
    created_date: DateTime<Utc>,
}

impl Item {
    /// Create a new item with a fresh ID and the current time
    pub fn new(details: ItemDetails) -> Self {
        Self {
            id: ItemId::new(),
            details,
            created_date: Utc::now(),
        }
    }

    /// Rebuild an item from stored parts
    pub const fn restore(id: ItemId, details: ItemDetails, created_date: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            created_date,
        }
    }

    /// Replace name, description and price
    pub fn revise(&mut self, details: ItemDetails) {
        self.details = details;
    }

    pub const fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.details.name()
    }

    pub fn description(&self) -> &str {
        self.details.description()
    }

    pub const fn price(&self) -> Price {
        self.details.price
    }

    pub const fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub const fn details(&self) -> &ItemDetails {
        &self.details
    }
}
