//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkWithOwner, NewLink};
use crate::domain::store_error::StoreError;
use async_trait::async_trait;

/// Durable store of links.
///
/// The store is the source of truth and is shared between many concurrent
/// requests; implementations provide their own synchronization.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Link>, StoreError>;

    /// Returns whether an identifier is currently in use.
    async fn exists_by_identifier(&self, identifier: &str) -> Result<bool, StoreError>;

    /// Inserts a new link with `access_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniquenessViolation`] if the identifier is taken.
    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Adds exactly one to the link's access counter.
    ///
    /// Must be a single atomic update scoped by identifier so that concurrent
    /// increments are never lost.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this identifier.
    async fn increment_access_count(&self, identifier: &str) -> Result<(), StoreError>;

    /// Deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this identifier.
    async fn delete(&self, identifier: &str) -> Result<(), StoreError>;

    /// Lists the links created by one caller, newest first.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, StoreError>;

    /// Lists every link with its creator's name, newest first.
    async fn list_all(&self) -> Result<Vec<LinkWithOwner>, StoreError>;

    /// Checks if the store is reachable.
    async fn health_check(&self) -> bool;
}
