//! SeatGuard Server: seat reservation with per-seat locking.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use seatguard_api::{AppState, build_app};
use seatguard_cache::CacheManager;
use seatguard_core::config::AppConfig;
use seatguard_core::error::AppError;
use seatguard_core::traits::lock::LockClient;
use seatguard_database::{BookingStore, CatalogStore, DatabasePool, MemoryStore, PgStore};
use seatguard_lock::LockClientDispatch;

#[tokio::main]
async fn main() {
    let env = std::env::var("SEATGUARD_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Booking and catalog stores, backed by the same storage.
struct Stores {
    booking: Arc<dyn BookingStore>,
    catalog: Arc<dyn CatalogStore>,
    pool: Option<DatabasePool>,
}

async fn build_stores(config: &AppConfig) -> Result<Stores, AppError> {
    match config.store.provider.as_str() {
        "postgres" => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database).await?;

            if config.database.run_migrations {
                tracing::info!("Running database migrations...");
                seatguard_database::migration::run_migrations(pool.pool()).await?;
                tracing::info!("Database migrations complete");
            }

            let store = Arc::new(PgStore::new(pool.pool().clone()));
            Ok(Stores {
                booking: store.clone(),
                catalog: store,
                pool: Some(pool),
            })
        }
        "memory" => {
            tracing::warn!("Using in-memory store; reservations do not survive a restart");
            let store = Arc::new(MemoryStore::new());
            Ok(Stores {
                booking: store.clone(),
                catalog: store,
                pool: None,
            })
        }
        other => Err(AppError::configuration(format!(
            "Unknown store provider: '{other}'. Supported: postgres, memory"
        ))),
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SeatGuard v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores ───────────────────────────────────────────
    let stores = build_stores(&config).await?;

    // ── Step 2: Cache ────────────────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache...");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    // ── Step 3: Seat locks ───────────────────────────────────────
    tracing::info!(provider = %config.lock.provider, "Initializing lock client...");
    let locks: Arc<dyn LockClient> = Arc::new(LockClientDispatch::from_config(&config.lock).await?);

    // ── Step 4: State and router ─────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let config = Arc::new(config);
    let state = AppState::new(config, cache, locks, stores.booking, stores.catalog);
    let app = build_app(state);

    // ── Step 5: Serve ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("SeatGuard server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = stores.pool {
        pool.close().await;
    }

    tracing::info!("SeatGuard server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
