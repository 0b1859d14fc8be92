//! Domain-level errors.
//!
//! These errors represent domain logic failures. They are independent of
//! infrastructure concerns (database, cache, sessions).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Stored or supplied password could not be processed
    #[error("Password error: {0}")]
    Password(String),
}

impl DomainError {
    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
