//! Typed failures reported by durable store implementations.

use thiserror::Error;

/// Failure of a single durable-store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,

    /// An insert collided with an existing unique key.
    #[error("unique constraint violated ({constraint})")]
    UniquenessViolation { constraint: String },

    /// Connectivity failure, pool exhaustion, timeout or any other driver error.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn is_uniqueness_violation(&self) -> bool {
        matches!(self, Self::UniquenessViolation { .. })
    }
}
