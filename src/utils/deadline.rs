//! Deadline enforcement for store and cache calls.
//!
//! Every I/O call the link core makes is bounded. An expired store call is a
//! [`StoreError::Unavailable`]; an expired cache call is a
//! [`CacheError::Timeout`], which callers treat as a miss.

use std::future::Future;
use std::time::Duration;

use crate::domain::StoreError;
use crate::infrastructure::cache::{CacheError, CacheResult};

/// Upper bounds for individual store and cache calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallDeadlines {
    pub store: Duration,
    pub cache: Duration,
}

impl CallDeadlines {
    pub fn new(store: Duration, cache: Duration) -> Self {
        Self { store, cache }
    }

    /// Runs a store call, failing with `Unavailable` if it outlives the deadline.
    pub async fn store<T, F>(&self, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.store, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::unavailable(format!(
                "{op} timed out after {}ms",
                self.store.as_millis()
            ))),
        }
    }

    /// Runs a cache call, failing with `Timeout` if it outlives the deadline.
    pub async fn cache<T, F>(&self, op: &'static str, fut: F) -> CacheResult<T>
    where
        F: Future<Output = CacheResult<T>>,
    {
        match tokio::time::timeout(self.cache, fut).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(format!(
                "{op} timed out after {}ms",
                self.cache.as_millis()
            ))),
        }
    }
}

impl Default for CallDeadlines {
    fn default() -> Self {
        Self {
            store: Duration::from_millis(2000),
            cache: Duration::from_millis(200),
        }
    }
}
