//! HTTP middleware components

pub mod request_id;
pub mod validation;

pub use request_id::{RequestId, RequestIdLayer};
pub use validation::{ValidatedJson, ValidationError};
