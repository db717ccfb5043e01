//! Fixtures and backend doubles shared by the service tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use seatguard_cache::CacheManager;
use seatguard_cache::memory::MemoryCacheProvider;
use seatguard_core::config::cache::MemoryCacheConfig;
use seatguard_core::error::AppError;
use seatguard_core::result::AppResult;
use seatguard_core::traits::cache::CacheProvider;
use seatguard_core::traits::lock::{LockClient, LockHandle};
use seatguard_core::types::id::EventId;
use seatguard_database::MemoryStore;
use seatguard_database::store::CatalogStore;
use seatguard_entity::event::NewEvent;
use seatguard_entity::seat::Seat;

pub(crate) fn new_event(seats: i32) -> NewEvent {
    NewEvent {
        title: "Swan Lake".to_string(),
        venue: "Opera House".to_string(),
        start_date: None,
        end_date: None,
        runtime_minutes: Some(120),
        age_restriction: None,
        poster_url: None,
        total_seats: seats,
        description: None,
    }
}

/// A memory store with one event of `seats` seats at 1000.00.
pub(crate) async fn seeded_store(seats: i32) -> (MemoryStore, EventId, Vec<Seat>) {
    let store = MemoryStore::new();
    let event = store
        .create_event(&new_event(seats), 100_000)
        .await
        .expect("create event");
    let seats = store.seats_by_event(event.id).await.expect("seats");
    (store, event.id, seats)
}

pub(crate) fn memory_cache() -> Arc<CacheManager> {
    let provider = MemoryCacheProvider::new(&MemoryCacheConfig::default(), 3600);
    Arc::new(CacheManager::from_provider(Arc::new(provider)))
}

pub(crate) fn failing_cache() -> Arc<CacheManager> {
    Arc::new(CacheManager::from_provider(Arc::new(FailingCache)))
}

/// Cache whose every operation fails.
#[derive(Debug)]
pub(crate) struct FailingCache;

#[async_trait]
impl CacheProvider for FailingCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::cache("cache down"))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        Err(AppError::cache("cache down"))
    }

    async fn set_default(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::cache("cache down"))
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Err(AppError::cache("cache down"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }
}

/// Lock backend that is unreachable.
#[derive(Debug)]
pub(crate) struct UnreachableLocks;

#[async_trait]
impl LockClient for UnreachableLocks {
    async fn acquire(&self, _key: &str, _wait: Duration) -> AppResult<LockHandle> {
        Err(AppError::lock_unavailable("connection refused"))
    }

    async fn release(&self, _handle: LockHandle) -> AppResult<bool> {
        Err(AppError::lock_unavailable("connection refused"))
    }

    async fn is_locked(&self, _key: &str) -> AppResult<bool> {
        Err(AppError::lock_unavailable("connection refused"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }
}
