//! Value Objects - Immutable, identity-less domain primitives

mod item_id;
mod price;

pub use item_id::ItemId;
pub use price::Price;
