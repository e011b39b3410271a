//! Cache-aside resolution of identifiers to destinations.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::application::error::LinkError;
use crate::domain::StoreError;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::is_valid_identifier;
use crate::utils::deadline::CallDeadlines;

/// Time-to-live of cached destinations.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(86_400);

/// Outcome of recording one access against the store.
enum AccessRecord {
    Recorded,
    /// The link disappeared between lookup and increment.
    Vanished,
    /// The store could not be reached; the access is lost and has been reported.
    Failed,
}

/// Resolves identifiers using the cache as fast path and the store as truth.
///
/// # Algorithm
///
/// 1. Look the identifier up in the cache.
/// 2. **Hit**: record one access in the store and return the cached destination.
/// 3. **Miss**: load the link from the store. If absent, return `None` without
///    touching anything. Otherwise cache the destination with a 1 day TTL,
///    record one access and return it.
///
/// Cache failures and cache timeouts degrade to a miss. A failed lookup in the
/// store is fatal to the request. A failed access increment is reported to
/// logs and metrics but does not change the returned destination.
///
/// None of these steps are atomic together. Concurrent misses for one identifier
/// may all write the cache; the value written is the same immutable
/// destination, so the outcome does not depend on their order.
pub struct ResolutionService<L: LinkRepository + ?Sized> {
    links: Arc<L>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Duration,
    deadlines: CallDeadlines,
}

impl<L: LinkRepository + ?Sized> ResolutionService<L> {
    /// Creates a resolution service over the given store and cache.
    pub fn new(
        links: Arc<L>,
        cache: Arc<dyn CacheService>,
        cache_ttl: Duration,
        deadlines: CallDeadlines,
    ) -> Self {
        Self {
            links,
            cache,
            cache_ttl,
            deadlines,
        }
    }

    /// Returns the destination for `identifier`, or `None` if it does not exist.
    ///
    /// Every `Some` result has incremented the link's access count by exactly
    /// one (unless the increment itself failed, which is logged). A `None`
    /// result never increments anything.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Store`] if the store lookup fails or times out.
    pub async fn resolve(&self, identifier: &str) -> Result<Option<String>, LinkError> {
        if !is_valid_identifier(identifier) {
            debug!(identifier, "Rejecting malformed identifier");
            count_outcome("not_found");
            return Ok(None);
        }

        if let Some(destination) = self.cached_destination(identifier).await {
            return Ok(self
                .finish_with_access(identifier, destination, "hit")
                .await);
        }

        let link = self
            .deadlines
            .store(
                "find_by_identifier",
                self.links.find_by_identifier(identifier),
            )
            .await?;

        let Some(link) = link else {
            debug!(identifier, "Identifier not found");
            count_outcome("not_found");
            return Ok(None);
        };

        self.populate_cache(identifier, &link.destination).await;

        Ok(self
            .finish_with_access(identifier, link.destination, "miss")
            .await)
    }

    /// Records the access and decides what the caller sees.
    async fn finish_with_access(
        &self,
        identifier: &str,
        destination: String,
        outcome: &'static str,
    ) -> Option<String> {
        match self.record_access(identifier).await {
            AccessRecord::Recorded | AccessRecord::Failed => {
                count_outcome(outcome);
                Some(destination)
            }
            AccessRecord::Vanished => {
                warn!(identifier, "Link deleted during resolution, evicting cache entry");
                self.evict(identifier).await;
                count_outcome("not_found");
                None
            }
        }
    }

    async fn cached_destination(&self, identifier: &str) -> Option<String> {
        match self
            .deadlines
            .cache("get", self.cache.get(identifier))
            .await
        {
            Ok(hit) => hit,
            Err(e) => {
                warn!(identifier, error = %e, "Cache lookup failed, falling back to store");
                metrics::counter!("shortlink_cache_errors_total", "op" => "get").increment(1);
                None
            }
        }
    }

    async fn populate_cache(&self, identifier: &str, destination: &str) {
        let result = self
            .deadlines
            .cache(
                "set",
                self.cache.set(identifier, destination, self.cache_ttl),
            )
            .await;

        if let Err(e) = result {
            warn!(identifier, error = %e, "Failed to cache destination");
            metrics::counter!("shortlink_cache_errors_total", "op" => "set").increment(1);
        }
    }

    async fn evict(&self, identifier: &str) {
        let result = self
            .deadlines
            .cache("invalidate", self.cache.invalidate(identifier))
            .await;

        if let Err(e) = result {
            warn!(identifier, error = %e, "Failed to evict cache entry");
            metrics::counter!("shortlink_cache_errors_total", "op" => "invalidate").increment(1);
        }
    }

    async fn record_access(&self, identifier: &str) -> AccessRecord {
        let result = self
            .deadlines
            .store(
                "increment_access_count",
                self.links.increment_access_count(identifier),
            )
            .await;

        match result {
            Ok(()) => AccessRecord::Recorded,
            Err(StoreError::NotFound) => AccessRecord::Vanished,
            Err(e) => {
                error!(identifier, error = %e, "Failed to record access");
                metrics::counter!("shortlink_access_record_failures_total").increment(1);
                AccessRecord::Failed
            }
        }
    }
}

fn count_outcome(outcome: &'static str) {
    metrics::counter!("shortlink_resolutions_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Link, NewLink};
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::cache::{CacheError, MemoryCache, MockCacheService, NullCache};
    use crate::infrastructure::persistence::MemoryLinkRepository;
    use chrono::Utc;

    const ID: &str = "abc123XYZ";
    const DEST: &str = "https://example.com/page";

    fn link() -> Link {
        Link::new(1, ID.to_string(), DEST.to_string(), 0, None, Utc::now())
    }

    async fn seeded_store() -> Arc<MemoryLinkRepository> {
        let store = Arc::new(MemoryLinkRepository::new());
        store
            .insert(NewLink {
                identifier: ID.to_string(),
                destination: DEST.to_string(),
                owner_id: None,
            })
            .await
            .unwrap();
        store
    }

    fn service<L: LinkRepository + ?Sized>(
        links: Arc<L>,
        cache: Arc<dyn CacheService>,
    ) -> ResolutionService<L> {
        ResolutionService::new(links, cache, DEFAULT_CACHE_TTL, CallDeadlines::default())
    }

    async fn access_count(store: &MemoryLinkRepository) -> i64 {
        store
            .find_by_identifier(ID)
            .await
            .unwrap()
            .unwrap()
            .access_count
    }

    #[tokio::test]
    async fn test_miss_then_hit_increments_each_time() {
        let store = seeded_store().await;
        let cache = Arc::new(MemoryCache::new());
        let svc = service(store.clone(), cache.clone());

        assert_eq!(svc.resolve(ID).await.unwrap().as_deref(), Some(DEST));
        assert_eq!(access_count(&store).await, 1);
        assert_eq!(cache.get(ID).await.unwrap().as_deref(), Some(DEST));

        assert_eq!(svc.resolve(ID).await.unwrap().as_deref(), Some(DEST));
        assert_eq!(access_count(&store).await, 2);
    }

    #[tokio::test]
    async fn test_unknown_identifier_touches_nothing() {
        let mut store = MockLinkRepository::new();
        store
            .expect_find_by_identifier()
            .times(1)
            .returning(|_| Ok(None));
        store.expect_increment_access_count().times(0);

        let cache = Arc::new(MemoryCache::new());
        let svc = service(Arc::new(store), cache.clone());

        assert_eq!(svc.resolve("nothere00").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_identifier_skips_store() {
        let mut store = MockLinkRepository::new();
        store.expect_find_by_identifier().times(0);
        store.expect_increment_access_count().times(0);

        let svc = service(Arc::new(store), Arc::new(NullCache::new()));

        assert_eq!(svc.resolve("../etc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_hit_does_not_read_store() {
        let mut store = MockLinkRepository::new();
        store.expect_find_by_identifier().times(0);
        store
            .expect_increment_access_count()
            .withf(|id| id == ID)
            .times(1)
            .returning(|_| Ok(()));

        let cache = Arc::new(MemoryCache::new());
        cache.set(ID, DEST, DEFAULT_CACHE_TTL).await.unwrap();

        let svc = service(Arc::new(store), cache);
        assert_eq!(svc.resolve(ID).await.unwrap().as_deref(), Some(DEST));
    }

    #[tokio::test]
    async fn test_cache_failure_degrades_to_store() {
        let store = seeded_store().await;

        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .returning(|_| Err(CacheError::ConnectionError("refused".into())));
        cache
            .expect_set()
            .returning(|_, _, _| Err(CacheError::ConnectionError("refused".into())));

        let svc = service(store.clone(), Arc::new(cache));

        assert_eq!(svc.resolve(ID).await.unwrap().as_deref(), Some(DEST));
        assert_eq!(access_count(&store).await, 1);
    }

    #[tokio::test]
    async fn test_slow_cache_is_treated_as_miss() {
        struct SlowCache;

        #[async_trait::async_trait]
        impl CacheService for SlowCache {
            async fn get(&self, _: &str) -> crate::infrastructure::cache::CacheResult<Option<String>> {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(Some("https://stale.example".to_string()))
            }
            async fn set(
                &self,
                _: &str,
                _: &str,
                _: Duration,
            ) -> crate::infrastructure::cache::CacheResult<()> {
                Ok(())
            }
            async fn invalidate(&self, _: &str) -> crate::infrastructure::cache::CacheResult<()> {
                Ok(())
            }
            async fn health_check(&self) -> bool {
                false
            }
            fn backend(&self) -> &'static str {
                "slow"
            }
        }

        let store = seeded_store().await;
        let svc = ResolutionService::new(
            store.clone(),
            Arc::new(SlowCache),
            DEFAULT_CACHE_TTL,
            CallDeadlines::new(Duration::from_secs(2), Duration::from_millis(20)),
        );

        assert_eq!(svc.resolve(ID).await.unwrap().as_deref(), Some(DEST));
        assert_eq!(access_count(&store).await, 1);
    }

    #[tokio::test]
    async fn test_store_failure_on_miss_is_fatal() {
        let mut store = MockLinkRepository::new();
        store
            .expect_find_by_identifier()
            .returning(|_| Err(StoreError::unavailable("connection refused")));

        let svc = service(Arc::new(store), Arc::new(NullCache::new()));
        let err = svc.resolve(ID).await.unwrap_err();

        assert!(matches!(err, LinkError::Store(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_increment_failure_still_returns_destination() {
        let mut store = MockLinkRepository::new();
        store
            .expect_find_by_identifier()
            .returning(|_| Ok(Some(link())));
        store
            .expect_increment_access_count()
            .times(1)
            .returning(|_| Err(StoreError::unavailable("connection reset")));

        let svc = service(Arc::new(store), Arc::new(MemoryCache::new()));

        assert_eq!(svc.resolve(ID).await.unwrap().as_deref(), Some(DEST));
    }

    #[tokio::test]
    async fn test_stale_cache_entry_for_deleted_link_is_evicted() {
        let store = Arc::new(MemoryLinkRepository::new());
        let cache = Arc::new(MemoryCache::new());
        cache.set(ID, DEST, DEFAULT_CACHE_TTL).await.unwrap();

        let svc = service(store, cache.clone());

        assert_eq!(svc.resolve(ID).await.unwrap(), None);
        assert_eq!(cache.get(ID).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_resolutions_lose_no_increments() {
        let store = seeded_store().await;
        let svc = Arc::new(service(store.clone(), Arc::new(MemoryCache::new())));

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move { svc.resolve(ID).await })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap().as_deref(), Some(DEST));
        }

        assert_eq!(access_count(&store).await, 32);
    }
}
