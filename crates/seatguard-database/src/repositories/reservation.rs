//! Reservation repository implementation.

use sqlx::{PgConnection, PgPool};

use seatguard_core::error::{AppError, ErrorKind};
use seatguard_core::result::AppResult;
use seatguard_core::types::id::{ReservationId, UserId};
use seatguard_entity::reservation::{NewReservation, Reservation, ReservationDetail};

/// Repository for the append-only reservations table.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a reservation and return the generated ID.
    ///
    /// `None` means the insert produced no row.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        reservation: &NewReservation,
    ) -> AppResult<Option<ReservationId>> {
        sqlx::query_scalar::<_, ReservationId>(
            "INSERT INTO reservations \
             (user_id, event_id, seat_id, reservation_date, status, total_price_cents) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(reservation.user_id)
        .bind(reservation.event_id)
        .bind(reservation.seat_id)
        .bind(reservation.reservation_date)
        .bind(reservation.status)
        .bind(reservation.total_price_cents)
        .fetch_optional(conn)
        .await
        .map_err(|e| super::map_write_error(e, "Failed to insert reservation"))
    }

    /// Find a reservation by ID.
    pub async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find reservation", e)
            })
    }

    /// List a user's reservations with event and seat details, newest first.
    pub async fn find_details_by_user(&self, user_id: UserId) -> AppResult<Vec<ReservationDetail>> {
        sqlx::query_as::<_, ReservationDetail>(
            "SELECT r.id, r.user_id, r.event_id, r.seat_id, r.reservation_date, r.status, \
                    r.total_price_cents, e.title AS event_title, \
                    e.start_date AS event_start_date, s.seat_code \
             FROM reservations r \
             JOIN events e ON e.id = r.event_id \
             JOIN seats s ON s.id = r.seat_id \
             WHERE r.user_id = $1 \
             ORDER BY r.reservation_date DESC, r.id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user reservations", e)
        })
    }
}
