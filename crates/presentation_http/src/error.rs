//! API error handling
//!
//! Client errors carry a small JSON body. Not-found and server-side errors
//! return an empty body; their details are only logged. An injected fault is
//! therefore indistinguishable from a genuine internal error.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => {
                debug!(error = %msg, "Rejecting request");
                let body = ErrorResponse {
                    error: msg,
                    code: "bad_request".to_string(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            },
            Self::NotFound(msg) => {
                debug!(resource = %msg, "Resource not found");
                StatusCode::NOT_FOUND.into_response()
            },
            Self::Internal(msg) => {
                error!(error = %msg, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            },
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(domain::DomainError::NotFound { entity_type, id }) => {
                Self::NotFound(format!("{entity_type} {id}"))
            },
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::InvalidOperation(msg) => Self::BadRequest(msg),
            ApplicationError::InjectedFault => {
                Self::Internal(ApplicationError::InjectedFault.to_string())
            },
            ApplicationError::ExternalService(msg)
            | ApplicationError::Configuration(msg)
            | ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
