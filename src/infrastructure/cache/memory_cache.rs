//! In-process cache with per-entry expiry.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    destination: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Cache backed by a sharded concurrent map.
///
/// Expired entries are dropped lazily on read. Suitable for single-process
/// deployments and for exercising the cache-aside path in tests.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Expiry instant for `ttl` from now, saturating at roughly a century out.
fn expiry(ttl: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(ttl)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 86_400);

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, identifier: &str) -> CacheResult<Option<String>> {
        let Some(entry) = self.entries.get(identifier) else {
            return Ok(None);
        };

        if entry.is_expired() {
            drop(entry);
            self.entries
                .remove_if(identifier, |_, entry| entry.is_expired());
            return Ok(None);
        }

        Ok(Some(entry.destination.clone()))
    }

    async fn set(&self, identifier: &str, destination: &str, ttl: Duration) -> CacheResult<()> {
        self.entries.insert(
            identifier.to_string(),
            Entry {
                destination: destination.to_string(),
                expires_at: expiry(ttl),
            },
        );
        Ok(())
    }

    async fn invalidate(&self, identifier: &str) -> CacheResult<()> {
        self.entries.remove(identifier);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
