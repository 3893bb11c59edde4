//! Storage adapters for catalog items

mod in_memory_item_store;

pub use in_memory_item_store::InMemoryItemStore;
