//! Lock key builders.

use seatguard_core::types::id::SeatId;

/// Lock key guarding one seat.
pub fn seat_lock(seat_id: SeatId) -> String {
    format!("seat:{seat_id}")
}
