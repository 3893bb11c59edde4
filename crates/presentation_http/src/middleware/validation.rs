//! Request body validation
//!
//! `ValidatedJson` deserializes a JSON body and runs its `validator` rules.
//! Every failure, whether malformed JSON or a broken rule, becomes a 400
//! with a `{error, code: "validation_error"}` body.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::JsonError(e) => e.body_text(),
            Self::ValidationFailed(msg) => msg.clone(),
        };
        debug!(error = %message, "Request body rejected");

        let body = ErrorResponse {
            error: message,
            code: "validation_error".to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Render field errors as `field: message` pairs, sorted by field name
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;
        Ok(Self(value))
    }
}
