//! Reservation entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use seatguard_core::types::id::{EventId, ReservationId, SeatId, UserId};

use super::status::ReservationStatus;

/// A confirmed reservation, mapped from the `reservations` table.
///
/// Rows are append-only: nothing in the booking path updates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Store-assigned identifier.
    pub id: ReservationId,
    /// The user who booked.
    pub user_id: UserId,
    /// The event the seat belongs to.
    pub event_id: EventId,
    /// The booked seat.
    pub seat_id: SeatId,
    /// When the reservation was created.
    pub reservation_date: DateTime<Utc>,
    /// Lifecycle state.
    pub status: ReservationStatus,
    /// Seat price at booking time, in minor units.
    pub total_price_cents: i64,
}

/// A reservation that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub user_id: UserId,
    pub event_id: EventId,
    pub seat_id: SeatId,
    pub reservation_date: DateTime<Utc>,
    pub status: ReservationStatus,
    pub total_price_cents: i64,
}

impl NewReservation {
    /// Attach the identifier the store generated.
    pub fn into_reservation(self, id: ReservationId) -> Reservation {
        Reservation {
            id,
            user_id: self.user_id,
            event_id: self.event_id,
            seat_id: self.seat_id,
            reservation_date: self.reservation_date,
            status: self.status,
            total_price_cents: self.total_price_cents,
        }
    }
}

/// A reservation joined with its event and seat, for "my reservations".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetail {
    pub id: ReservationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub seat_id: SeatId,
    pub reservation_date: DateTime<Utc>,
    pub status: ReservationStatus,
    pub total_price_cents: i64,
    /// Title of the booked event.
    pub event_title: String,
    /// First performance date of the event.
    pub event_start_date: Option<NaiveDate>,
    /// Seat label such as `A-12`.
    pub seat_code: String,
}
