//! Locator error types.

use crate::domain::DomainError;
use crate::store::StoreError;

/// Errors returned by locator operations.
///
/// Every variant except [`LocatorError::Storage`] is the caller's fault and
/// carries a message safe to show to them.
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    /// Wrong method or a body that is not a JSON object
    #[error("{0}")]
    InvalidRequest(String),

    /// A required submission field is absent or blank
    #[error("Field '{0}' is required and cannot be empty")]
    MissingField(&'static str),

    /// A malformed or out-of-range parameter
    #[error("{0}")]
    InvalidInput(String),

    /// A submission field failed validation
    #[error("{0}")]
    ValidationFailed(String),

    /// The referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// The write would violate a uniqueness rule
    #[error("{0}")]
    Conflict(String),

    /// Query preparation or execution failed
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl LocatorError {
    /// Validation failure carrying a domain error's message.
    pub(crate) fn validation(err: DomainError) -> Self {
        LocatorError::ValidationFailed(err.to_string())
    }

    /// Invalid input carrying a domain error's message.
    pub(crate) fn input(err: DomainError) -> Self {
        LocatorError::InvalidInput(err.to_string())
    }
}
