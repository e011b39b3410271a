//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
    #[error("Cache timeout: {0}")]
    Timeout(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Volatile keyed cache of `identifier -> destination`.
///
/// Only destinations are cached; access counters always live in the durable
/// store. Implementations report failures honestly and leave it to the caller
/// to degrade (see [`crate::application::services::ResolutionService`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Looks up the cached destination for an identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(destination))` on cache hit
    /// - `Ok(None)` on cache miss or expired entry
    async fn get(&self, identifier: &str) -> CacheResult<Option<String>>;

    /// Stores a destination with a time-to-live.
    ///
    /// Writing the same pair twice is indistinguishable from writing it once,
    /// apart from the refreshed TTL.
    async fn set(&self, identifier: &str, destination: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes a cached entry. Removing an absent entry is not an error.
    async fn invalidate(&self, identifier: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
