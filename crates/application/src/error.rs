//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation conflicts with current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Synthetic failure produced by the fault injector
    #[error("Injected fault")]
    InjectedFault,

    /// External service error (store, message bus)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::InjectedFault | Self::ExternalService(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_fault_is_retryable() {
        assert!(ApplicationError::InjectedFault.is_retryable());
        assert!(ApplicationError::ExternalService("bus down".to_string()).is_retryable());
    }

    #[test]
    fn not_found_is_not_retryable() {
        assert!(!ApplicationError::NotFound("item".to_string()).is_retryable());
        assert!(!ApplicationError::InvalidOperation("dup".to_string()).is_retryable());
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::ValidationError("bad".to_string()).into();
        assert_eq!(err.to_string(), "Validation failed: bad");
    }

    #[test]
    fn injected_fault_message_has_no_detail() {
        assert_eq!(ApplicationError::InjectedFault.to_string(), "Injected fault");
    }
}
