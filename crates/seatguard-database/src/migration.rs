//! Embedded schema for events, seats, and reservations.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use seatguard_core::error::{AppError, ErrorKind};

/// Migrations from the workspace `migrations/` directory, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the booking schema up to date. Already-applied versions are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Booking schema migration failed: {e}"),
            e,
        )
    })?;

    info!(migrations = known, "Booking schema is current");
    Ok(())
}
