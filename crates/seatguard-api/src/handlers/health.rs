//! Health check handler.

use axum::Json;
use axum::extract::State;

use seatguard_core::result::AppResult;
use seatguard_core::traits::cache::CacheProvider;
use seatguard_core::traits::lock::LockClient;
use seatguard_database::store::BookingStore;

use crate::dto::response::{ApiResponse, ComponentHealth, HealthResponse};
use crate::state::AppState;

fn component(result: AppResult<bool>) -> ComponentHealth {
    match result {
        Ok(true) => ComponentHealth {
            status: "up".to_string(),
            error: None,
        },
        Ok(false) => ComponentHealth {
            status: "down".to_string(),
            error: None,
        },
        Err(e) => ComponentHealth {
            status: "down".to_string(),
            error: Some(e.message),
        },
    }
}

/// GET /api/health
///
/// Always 200 while the process serves requests; backend state is reported
/// in the body.
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let (store, cache, lock) = tokio::join!(
        state.booking_store.health_check(),
        state.cache.health_check(),
        state.locks.health_check(),
    );

    let store = component(store);
    let cache = component(cache);
    let lock = component(lock);
    let all_up = [&store, &cache, &lock].iter().all(|c| c.status == "up");

    Json(ApiResponse::ok(HealthResponse {
        status: if all_up { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        store,
        cache,
        lock,
    }))
}
