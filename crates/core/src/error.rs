//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (rejected
/// writes, missing attributes, broken invariants). Nothing here is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed its field rule (e.g. a non-integer quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An attribute was read that is not stored on the item.
    #[error("attribute not found: {0}")]
    MissingAttribute(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_attribute(key: impl Into<String>) -> Self {
        Self::MissingAttribute(key.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// True for failures caused by the caller's input rather than item state.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
