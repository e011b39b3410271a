//! Errors surfaced by the link services.

use thiserror::Error;

use crate::domain::StoreError;
use crate::utils::url_validator::DestinationError;

/// Failure of a link operation.
///
/// Store failures pass through unmodified; cache failures never appear here
/// because the services absorb them.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("link not found")]
    NotFound,

    #[error("caller is not allowed to modify this link")]
    Forbidden,

    #[error("caller account is not active")]
    InactiveCaller,

    #[error(transparent)]
    InvalidDestination(#[from] DestinationError),

    /// No unused identifier was found within the retry bound.
    #[error("failed to generate a unique identifier after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}
