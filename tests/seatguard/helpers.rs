//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use seatguard_api::{AppState, build_app};
use seatguard_cache::CacheManager;
use seatguard_core::config::AppConfig;
use seatguard_core::traits::lock::LockClient;
use seatguard_core::types::id::EventId;
use seatguard_database::{CatalogStore, MemoryStore};
use seatguard_entity::event::NewEvent;
use seatguard_entity::seat::Seat;
use seatguard_lock::MemoryLockClient;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: MemoryStore,
    /// Lock client shared with the router
    pub locks: Arc<MemoryLockClient>,
}

/// A response with its JSON body decoded
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        Self::with_lock_wait(3_000).await
    }

    /// Create a test application with a custom seat-lock wait bound
    pub async fn with_lock_wait(lock_wait_ms: u64) -> Self {
        let mut config = AppConfig::default();
        config.reservation.lock_wait_ms = lock_wait_ms;

        let store = MemoryStore::new();
        let locks = Arc::new(MemoryLockClient::with_timing(
            Duration::from_secs(30),
            Duration::from_millis(5),
        ));
        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );

        let state = AppState::new(
            Arc::new(config),
            cache,
            locks.clone() as Arc<dyn LockClient>,
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        );

        Self {
            router: build_app(state),
            store,
            locks,
        }
    }

    /// Insert an event with `seats` seats and return its ID and seats
    pub async fn seed_event(&self, seats: i32) -> (EventId, Vec<Seat>) {
        let event = self
            .store
            .create_event(
                &NewEvent {
                    title: "Giselle".to_string(),
                    venue: "Main Stage".to_string(),
                    start_date: None,
                    end_date: None,
                    runtime_minutes: Some(110),
                    age_restriction: None,
                    poster_url: None,
                    total_seats: seats,
                    description: None,
                },
                100_000,
            )
            .await
            .expect("Failed to seed event");
        let seats = self
            .store
            .seats_by_event(event.id)
            .await
            .expect("Failed to read seats");
        (event.id, seats)
    }

    /// Send a request, optionally as a trusted user
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        user_id: Option<i64>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header("x-user-id", id.to_string());
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
