//! HTTP client for a running catalog service
//!
//! Every outgoing request carries a fresh `X-Request-Id` header so that
//! client and server logs can be correlated.

mod catalog_client;

pub use catalog_client::{
    CatalogClient, CatalogClientConfig, CatalogClientError, HealthStatus, X_REQUEST_ID,
};
