//! Seat repository implementation.

use sqlx::{PgConnection, PgPool};

use seatguard_core::error::{AppError, ErrorKind};
use seatguard_core::result::AppResult;
use seatguard_core::types::id::{EventId, SeatId};
use seatguard_entity::seat::Seat;

/// Repository for seat reads and the conditional reserve update.
#[derive(Debug, Clone)]
pub struct SeatRepository {
    pool: PgPool,
}

impl SeatRepository {
    /// Create a new seat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a seat by ID.
    pub async fn find_by_id(&self, id: SeatId) -> AppResult<Option<Seat>> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find seat", e))
    }

    /// Find a seat by ID and hold its row lock until the transaction ends.
    pub async fn find_by_id_for_update(
        &self,
        conn: &mut PgConnection,
        id: SeatId,
    ) -> AppResult<Option<Seat>> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock seat", e))
    }

    /// List all seats of an event in seat order.
    pub async fn find_by_event(&self, event_id: EventId) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE event_id = $1 ORDER BY id")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list seats for event", e)
            })
    }

    /// List the open seats of an event.
    pub async fn find_available_by_event(&self, event_id: EventId) -> AppResult<Vec<Seat>> {
        sqlx::query_as::<_, Seat>(
            "SELECT * FROM seats WHERE event_id = $1 AND is_reserved = FALSE ORDER BY id",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list available seats", e)
        })
    }

    /// Write a reserved seat, only if the stored row is still open.
    ///
    /// Returns the number of rows changed: `0` means another writer got there
    /// first.
    pub async fn mark_reserved(&self, conn: &mut PgConnection, seat: &Seat) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE seats SET is_reserved = $2, reservation_id = $3 \
             WHERE id = $1 AND is_reserved = FALSE",
        )
        .bind(seat.id)
        .bind(seat.is_reserved)
        .bind(seat.reservation_id)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update seat", e))?;
        Ok(result.rows_affected())
    }

    /// Insert `count` seats labelled `A-1..A-count` for an event.
    pub async fn provision(
        &self,
        conn: &mut PgConnection,
        event_id: EventId,
        count: i32,
        price_cents: i64,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "INSERT INTO seats (event_id, seat_code, price_cents) \
             SELECT $1, 'A-' || n, $2 FROM generate_series(1, $3) AS n",
        )
        .bind(event_id)
        .bind(price_cents)
        .bind(count)
        .execute(conn)
        .await
        .map_err(|e| super::map_write_error(e, "Failed to provision seats"))?;
        Ok(result.rows_affected())
    }
}
