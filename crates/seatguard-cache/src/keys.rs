//! Cache key builders for the catalog read path.
//!
//! Keys are unprefixed; the Redis provider adds its configured namespace.

use seatguard_core::types::id::EventId;

/// Cache key for the full event listing.
pub fn event_listing() -> String {
    "events:all_list".to_string()
}

/// Cache key for the seat listing of one event.
pub fn event_seats(event_id: EventId) -> String {
    format!("events:{event_id}:seats")
}
