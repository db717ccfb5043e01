//! PostgreSQL-backed booking and catalog stores.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use seatguard_core::error::{AppError, ErrorKind};
use seatguard_core::result::AppResult;
use seatguard_core::types::id::{EventId, ReservationId, SeatId, UserId};
use seatguard_entity::event::{Event, EventStatus, EventSummary, NewEvent};
use seatguard_entity::reservation::{NewReservation, Reservation, ReservationDetail};
use seatguard_entity::seat::Seat;

use super::{BookingStore, BookingTransaction, CatalogStore, InsertOutcome};
use crate::repositories::{EventRepository, ReservationRepository, SeatRepository};

/// Store backed by the PostgreSQL repositories.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    seats: SeatRepository,
    reservations: ReservationRepository,
    events: EventRepository,
}

impl PgStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            seats: SeatRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            pool,
        }
    }

    async fn begin_tx(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }
}

/// A booking transaction on a single pooled connection.
///
/// `read_seat` takes the row lock (`FOR UPDATE`) so concurrent writers to
/// the same seat serialize even without the distributed lock.
pub struct PgBookingTransaction {
    tx: Transaction<'static, Postgres>,
    seats: SeatRepository,
    reservations: ReservationRepository,
}

#[async_trait]
impl BookingTransaction for PgBookingTransaction {
    async fn read_seat(&mut self, seat_id: SeatId) -> AppResult<Option<Seat>> {
        self.seats.find_by_id_for_update(&mut self.tx, seat_id).await
    }

    async fn insert_reservation(
        &mut self,
        reservation: &NewReservation,
    ) -> AppResult<InsertOutcome> {
        let id = self.reservations.insert(&mut self.tx, reservation).await?;
        Ok(id.map_or_else(InsertOutcome::empty, InsertOutcome::inserted))
    }

    async fn update_seat(&mut self, seat: &Seat) -> AppResult<u64> {
        self.seats.mark_reserved(&mut self.tx, seat).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
        })
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn begin(&self) -> AppResult<Box<dyn BookingTransaction>> {
        let tx = self.begin_tx().await?;
        Ok(Box::new(PgBookingTransaction {
            tx,
            seats: self.seats.clone(),
            reservations: self.reservations.clone(),
        }))
    }

    async fn find_reservation(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        self.reservations.find_by_id(id).await
    }

    async fn reservations_for_user(&self, user_id: UserId) -> AppResult<Vec<ReservationDetail>> {
        self.reservations.find_details_by_user(user_id).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_event_summaries(&self) -> AppResult<Vec<EventSummary>> {
        self.events.list_summaries().await
    }

    async fn find_event(&self, id: EventId) -> AppResult<Option<Event>> {
        self.events.find_by_id(id).await
    }

    async fn seats_by_event(&self, event_id: EventId) -> AppResult<Vec<Seat>> {
        self.seats.find_by_event(event_id).await
    }

    async fn available_seats_by_event(&self, event_id: EventId) -> AppResult<Vec<Seat>> {
        self.seats.find_available_by_event(event_id).await
    }

    async fn find_seat(&self, id: SeatId) -> AppResult<Option<Seat>> {
        self.seats.find_by_id(id).await
    }

    async fn create_event(&self, event: &NewEvent, seat_price_cents: i64) -> AppResult<Event> {
        let mut tx = self.begin_tx().await?;

        let created = self.events.insert(&mut tx, event).await?;
        let provisioned = self
            .seats
            .provision(&mut tx, created.id, event.total_seats, seat_price_cents)
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit event creation", e)
        })?;

        debug!(event_id = %created.id, seats = provisioned, "Event created");
        Ok(created)
    }

    async fn update_event_status(&self, id: EventId, status: EventStatus) -> AppResult<bool> {
        Ok(self.events.update_status(id, status).await? > 0)
    }
}
