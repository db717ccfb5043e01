//! Seat entity model.

use serde::{Deserialize, Serialize};

use seatguard_core::AppError;
use seatguard_core::types::id::{EventId, ReservationId, SeatId};

/// A single seat of an event, mapped from the `seats` table.
///
/// `is_reserved` and `reservation_id` always move together: a seat is
/// reserved exactly when it points at the reservation that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Seat identifier.
    pub id: SeatId,
    /// Owning event.
    pub event_id: EventId,
    /// Human label such as `A-12`.
    pub seat_code: String,
    /// Fixed price in minor units.
    pub price_cents: i64,
    /// Whether a reservation owns this seat.
    pub is_reserved: bool,
    /// The owning reservation, if any.
    pub reservation_id: Option<ReservationId>,
}

impl Seat {
    /// Return a reserved copy of this seat owned by `reservation_id`.
    ///
    /// Fails with a conflict if the seat is already reserved.
    pub fn reserve(&self, reservation_id: ReservationId) -> Result<Seat, AppError> {
        if self.is_reserved {
            return Err(AppError::conflict(format!(
                "Seat {} is already reserved",
                self.id
            )));
        }
        Ok(Seat {
            is_reserved: true,
            reservation_id: Some(reservation_id),
            ..self.clone()
        })
    }

    /// Whether the seat can still be booked.
    pub fn is_available(&self) -> bool {
        !self.is_reserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat() -> Seat {
        Seat {
            id: SeatId(1),
            event_id: EventId(10),
            seat_code: "A-1".to_string(),
            price_cents: 100_000,
            is_reserved: false,
            reservation_id: None,
        }
    }

    #[test]
    fn test_reserve_returns_new_value() {
        let original = seat();
        let reserved = original.reserve(ReservationId(5)).expect("reserve");

        assert!(original.is_available());
        assert!(reserved.is_reserved);
        assert_eq!(reserved.reservation_id, Some(ReservationId(5)));
        assert_eq!(reserved.seat_code, original.seat_code);
    }

    #[test]
    fn test_reserve_twice_is_conflict() {
        let reserved = seat().reserve(ReservationId(5)).expect("reserve");
        let err = reserved.reserve(ReservationId(6)).unwrap_err();
        assert_eq!(err.kind, seatguard_core::ErrorKind::Conflict);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(seat()).expect("serialize");
        assert_eq!(json["seatCode"], "A-1");
        assert_eq!(json["isReserved"], false);
    }
}
