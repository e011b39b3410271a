//! Repository trait for caller credentials.

use crate::domain::entities::{Caller, NewCaller};
use crate::domain::store_error::StoreError;
use async_trait::async_trait;

/// Storage of callers and their hashed bearer tokens.
///
/// Tokens are stored as HMAC-SHA256 hashes; raw tokens are never persisted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCallerRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallerRepository: Send + Sync {
    /// Finds a non-revoked caller by token hash.
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Caller>, StoreError>;

    /// Registers a caller.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniquenessViolation`] if the name or token hash is taken.
    async fn create(&self, new_caller: NewCaller) -> Result<Caller, StoreError>;

    /// Lists all callers, newest first.
    async fn list(&self) -> Result<Vec<Caller>, StoreError>;

    /// Finds a caller by database id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Caller>, StoreError>;

    /// Finds a caller by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Caller>, StoreError>;

    /// Marks a caller's token as revoked.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such caller exists.
    async fn revoke(&self, id: i64) -> Result<(), StoreError>;

    /// Enables or disables a caller.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such caller exists.
    async fn set_active(&self, id: i64, is_active: bool) -> Result<(), StoreError>;
}
