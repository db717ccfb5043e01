//! Storage traits the booking and catalog services run against.
//!
//! [`BookingStore::begin`] hands out a [`BookingTransaction`]: every write
//! made through it becomes visible together on `commit` or not at all.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use seatguard_core::result::AppResult;
use seatguard_core::types::id::{EventId, ReservationId, SeatId, UserId};
use seatguard_entity::event::{Event, EventStatus, EventSummary, NewEvent};
use seatguard_entity::reservation::{NewReservation, Reservation, ReservationDetail};
use seatguard_entity::seat::Seat;

/// Result of inserting a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Rows written, `1` on success.
    pub rows_affected: u64,
    /// The store-generated identifier, present when a row was written.
    pub id: Option<ReservationId>,
}

impl InsertOutcome {
    /// A single inserted row.
    pub fn inserted(id: ReservationId) -> Self {
        Self {
            rows_affected: 1,
            id: Some(id),
        }
    }

    /// Nothing was written.
    pub fn empty() -> Self {
        Self {
            rows_affected: 0,
            id: None,
        }
    }
}

/// One atomic unit of booking work.
///
/// Dropping a transaction without calling `commit` discards its writes.
#[async_trait]
pub trait BookingTransaction: Send {
    /// Read a seat as seen by this transaction.
    async fn read_seat(&mut self, seat_id: SeatId) -> AppResult<Option<Seat>>;

    /// Insert a reservation row.
    async fn insert_reservation(&mut self, reservation: &NewReservation)
    -> AppResult<InsertOutcome>;

    /// Write a reserved seat, only if the stored seat is still open.
    ///
    /// Returns the number of rows changed.
    async fn update_seat(&mut self, seat: &Seat) -> AppResult<u64>;

    /// Make every write of this transaction visible.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard every write of this transaction.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Persistent record of seats and reservations.
#[async_trait]
pub trait BookingStore: Send + Sync + std::fmt::Debug + 'static {
    /// Open a transaction.
    async fn begin(&self) -> AppResult<Box<dyn BookingTransaction>>;

    /// Find a reservation by ID.
    async fn find_reservation(&self, id: ReservationId) -> AppResult<Option<Reservation>>;

    /// List a user's reservations, newest first.
    async fn reservations_for_user(&self, user_id: UserId) -> AppResult<Vec<ReservationDetail>>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Read and administrative access to events and their seat inventory.
#[async_trait]
pub trait CatalogStore: Send + Sync + std::fmt::Debug + 'static {
    /// List every event with its open-seat count, in ID order.
    async fn list_event_summaries(&self) -> AppResult<Vec<EventSummary>>;

    /// Find an event by ID.
    async fn find_event(&self, id: EventId) -> AppResult<Option<Event>>;

    /// List the seats of an event in seat order.
    async fn seats_by_event(&self, event_id: EventId) -> AppResult<Vec<Seat>>;

    /// List the open seats of an event in seat order.
    async fn available_seats_by_event(&self, event_id: EventId) -> AppResult<Vec<Seat>>;

    /// Find a seat by ID.
    async fn find_seat(&self, id: SeatId) -> AppResult<Option<Seat>>;

    /// Insert an `ACTIVE` event and its `A-1..A-n` seats atomically.
    async fn create_event(&self, event: &NewEvent, seat_price_cents: i64) -> AppResult<Event>;

    /// Change an event's status. Returns `false` if the event does not exist.
    async fn update_event_status(&self, id: EventId, status: EventStatus) -> AppResult<bool>;
}
