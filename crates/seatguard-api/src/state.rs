//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use seatguard_cache::CacheManager;
use seatguard_core::config::AppConfig;
use seatguard_core::traits::lock::LockClient;
use seatguard_database::store::{BookingStore, CatalogStore};
use seatguard_service::{
    CatalogCache, CatalogService, ReservationCoordinator, ReservationExecutor,
    ReservationQueryService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// Seat lock client (Redis or in-memory)
    pub locks: Arc<dyn LockClient>,
    /// Booking store (PostgreSQL or in-memory)
    pub booking_store: Arc<dyn BookingStore>,

    // ── Services ─────────────────────────────────────────────
    /// Reservation entry point
    pub coordinator: Arc<ReservationCoordinator>,
    /// Reservation reads
    pub reservation_queries: Arc<ReservationQueryService>,
    /// Event and seat catalog
    pub catalog: Arc<CatalogService>,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wire the services over the given backends.
    pub fn new(
        config: Arc<AppConfig>,
        cache: Arc<CacheManager>,
        locks: Arc<dyn LockClient>,
        booking_store: Arc<dyn BookingStore>,
        catalog_store: Arc<dyn CatalogStore>,
    ) -> Self {
        let catalog_cache = Arc::new(CatalogCache::new(Arc::clone(&cache), &config.catalog));

        let coordinator = Arc::new(ReservationCoordinator::new(
            Arc::clone(&locks),
            ReservationExecutor::new(Arc::clone(&booking_store)),
            Arc::clone(&catalog_cache),
            &config.reservation,
        ));
        let reservation_queries =
            Arc::new(ReservationQueryService::new(Arc::clone(&booking_store)));
        let catalog = Arc::new(CatalogService::new(
            catalog_store,
            catalog_cache,
            &config.catalog,
        ));

        Self {
            config,
            cache,
            locks,
            booking_store,
            coordinator,
            reservation_queries,
            catalog,
            started_at: Instant::now(),
        }
    }
}
