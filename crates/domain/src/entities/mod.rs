//! Domain entities - Objects with identity and lifecycle

mod item;

pub use item::{Item, ItemDetails};
