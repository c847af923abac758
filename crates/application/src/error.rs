//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Completion service error
    #[error("Completion error: {0}")]
    Completion(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
