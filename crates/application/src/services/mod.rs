//! Application services (use cases)

mod catalog_service;

pub use catalog_service::CatalogService;
