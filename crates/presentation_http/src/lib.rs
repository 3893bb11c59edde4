//! Play catalog HTTP presentation layer
//!
//! axum handlers, middleware and wiring for the `/items` API.

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod tasks;

pub use bootstrap::{Bootstrapped, bootstrap, bootstrap_with_store};
pub use error::ApiError;
pub use middleware::{RequestId, RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::{create_app, create_router};
pub use state::{AppState, ChaosHandle};
