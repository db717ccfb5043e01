//! Read-through cache for catalog listings.
//!
//! The cache never decides an answer. Any backend failure degrades to the
//! store, and a failed eviction is logged rather than surfaced, since the
//! committed reservation it follows cannot be undone.
//!
//! Every eviction bumps a generation counter. A value computed while the
//! generation moved is returned but not written back, so a listing read
//! that raced a reservation cannot re-populate the cache with the old
//! availability. The counter is per process; evictions on other nodes are
//! bounded by the listing TTL.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use seatguard_cache::{CacheManager, keys};
use seatguard_core::config::reservation::CatalogConfig;
use seatguard_core::result::AppResult;
use seatguard_core::traits::cache::CacheProvider;
use seatguard_core::types::id::EventId;

/// Catalog-aware wrapper around the cache manager.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    cache: Arc<CacheManager>,
    ttl: Option<Duration>,
    generation: Arc<AtomicU64>,
}

impl CatalogCache {
    /// Create a catalog cache. A zero listing TTL uses the provider default.
    pub fn new(cache: Arc<CacheManager>, config: &CatalogConfig) -> Self {
        let ttl = (config.listing_ttl_seconds > 0)
            .then(|| Duration::from_secs(config.listing_ttl_seconds));
        Self {
            cache,
            ttl,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Return the cached value under `key`, or compute, store, and return it.
    pub async fn get_or_compute<T, F, Fut>(&self, key: &str, compute: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        match self.cache.get_json::<T>(key).await {
            Ok(Some(hit)) => {
                debug!(key = %key, "Catalog cache hit");
                return Ok(hit);
            }
            Ok(None) => debug!(key = %key, "Catalog cache miss"),
            Err(e) => warn!(key = %key, error = %e, "Catalog cache read failed, using store"),
        }

        let generation = self.generation.load(Ordering::Acquire);
        let value = compute().await?;

        if self.generation.load(Ordering::Acquire) != generation {
            debug!(key = %key, "Catalog changed while computing, skipping cache write");
            return Ok(value);
        }
        if let Err(e) = self.cache.set_json(key, &value, self.ttl).await {
            warn!(key = %key, error = %e, "Catalog cache write failed");
        }
        Ok(value)
    }

    /// Drop the full event listing.
    pub async fn evict_listing(&self) -> AppResult<()> {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.cache.delete(&keys::event_listing()).await
    }

    /// Drop every cached view of one event, including the listing.
    pub async fn evict_event(&self, event_id: EventId) -> AppResult<()> {
        self.evict_listing().await?;
        self.cache.delete(&keys::event_seats(event_id)).await
    }

    /// Invalidate after a committed reservation. Failures are logged only.
    pub async fn evict_after_reservation(&self, event_id: EventId) {
        if let Err(e) = self.evict_event(event_id).await {
            warn!(event_id = %event_id, error = %e, "Listing eviction after reservation failed");
        }
    }

    /// Invalidate after an event was created or changed. Failures are logged only.
    pub async fn evict_after_change(&self, event_id: EventId) {
        if let Err(e) = self.evict_event(event_id).await {
            warn!(event_id = %event_id, error = %e, "Listing eviction after catalog change failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use seatguard_core::error::AppError;

    use super::*;
    use crate::testing::{failing_cache, memory_cache};

    fn catalog_cache(cache: Arc<CacheManager>) -> CatalogCache {
        CatalogCache::new(cache, &CatalogConfig::default())
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = catalog_cache(memory_cache());
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        for _ in 0..2 {
            let value: Vec<i64> = cache
                .get_or_compute("events:all_list", || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(value, vec![1, 2, 3]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    async fn read_seats(cache: &CatalogCache, calls: &AtomicUsize) -> usize {
        cache
            .get_or_compute(&keys::event_seats(EventId(7)), || async move {
                Ok::<_, AppError>(calls.fetch_add(1, Ordering::SeqCst))
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_eviction_forces_recompute() {
        let cache = catalog_cache(memory_cache());
        let calls = AtomicUsize::new(0);

        assert_eq!(read_seats(&cache, &calls).await, 0);
        assert_eq!(read_seats(&cache, &calls).await, 0);
        cache.evict_after_reservation(EventId(7)).await;
        assert_eq!(read_seats(&cache, &calls).await, 1);
    }

    #[tokio::test]
    async fn test_value_computed_across_an_eviction_is_not_cached() {
        let cache = catalog_cache(memory_cache());
        let calls = AtomicUsize::new(0);
        let (racing, calls_ref) = (&cache, &calls);

        let stale: usize = cache
            .get_or_compute(&keys::event_seats(EventId(7)), || async move {
                let seen = calls_ref.fetch_add(1, Ordering::SeqCst);
                racing.evict_after_reservation(EventId(7)).await;
                Ok(seen)
            })
            .await
            .unwrap();
        assert_eq!(stale, 0);

        assert_eq!(read_seats(&cache, &calls).await, 1);
        assert_eq!(read_seats(&cache, &calls).await, 1);
    }

    #[tokio::test]
    async fn test_failing_backend_degrades_to_store() {
        let cache = catalog_cache(failing_cache());

        let value: String = cache
            .get_or_compute("events:all_list", || async { Ok("fresh".to_string()) })
            .await
            .unwrap();
        assert_eq!(value, "fresh");

        assert!(cache.evict_listing().await.is_err());
        // Logged, never surfaced.
        cache.evict_after_reservation(EventId(1)).await;
        cache.evict_after_change(EventId(1)).await;
    }

    #[tokio::test]
    async fn test_compute_error_is_returned() {
        let cache = catalog_cache(memory_cache());
        let err = cache
            .get_or_compute::<Vec<i64>, _, _>("events:all_list", || async {
                Err(AppError::database("down"))
            })
            .await
            .unwrap_err();
        assert_eq!(err.message, "down");
    }
}
