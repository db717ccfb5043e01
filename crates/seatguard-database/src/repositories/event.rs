//! Event repository implementation.

use sqlx::{PgConnection, PgPool};

use seatguard_core::error::{AppError, ErrorKind};
use seatguard_core::result::AppResult;
use seatguard_core::types::id::EventId;
use seatguard_entity::event::{Event, EventStatus, EventSummary, NewEvent};

/// Repository for events and the catalog listing.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every event with its open-seat count.
    pub async fn list_summaries(&self) -> AppResult<Vec<EventSummary>> {
        sqlx::query_as::<_, EventSummary>(
            "SELECT e.*, COUNT(s.id) FILTER (WHERE s.is_reserved = FALSE) AS available_seats \
             FROM events e \
             LEFT JOIN seats s ON s.event_id = e.id \
             GROUP BY e.id \
             ORDER BY e.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// Insert a new event with status `ACTIVE`.
    pub async fn insert(&self, conn: &mut PgConnection, event: &NewEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events \
             (title, venue, start_date, end_date, runtime_minutes, age_restriction, \
              poster_url, total_seats, status, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(&event.title)
        .bind(&event.venue)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.runtime_minutes)
        .bind(&event.age_restriction)
        .bind(&event.poster_url)
        .bind(event.total_seats)
        .bind(EventStatus::Active)
        .bind(&event.description)
        .fetch_one(conn)
        .await
        .map_err(|e| super::map_write_error(e, "Failed to create event"))
    }

    /// Change an event's status. Returns the number of rows changed.
    pub async fn update_status(&self, id: EventId, status: EventStatus) -> AppResult<u64> {
        let result = sqlx::query("UPDATE events SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update event status", e)
            })?;
        Ok(result.rows_affected())
    }
}
