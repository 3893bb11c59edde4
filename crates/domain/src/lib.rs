//! Domain layer for the Play catalog
//!
//! Contains the catalog item entity, its value objects, catalog events and
//! domain errors. This layer knows nothing about HTTP, storage or messaging.

pub mod entities;
pub mod errors;
pub mod events;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use events::CatalogEvent;
pub use value_objects::*;
