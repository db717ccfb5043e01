//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use seatguard_core::types::id::{EventId, SeatId};
use seatguard_entity::event::NewEvent;

/// Seat reservation request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// Event the seat belongs to.
    pub event_id: EventId,
    /// Seat to reserve.
    pub seat_id: SeatId,
}

/// Event creation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "Venue is required"))]
    pub venue: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 1440))]
    pub runtime_minutes: Option<i32>,
    #[validate(length(max = 50))]
    pub age_restriction: Option<String>,
    #[validate(url)]
    pub poster_url: Option<String>,
    /// Number of seats to provision.
    #[validate(range(min = 1, max = 10000, message = "Total seats must be between 1 and 10000"))]
    pub total_seats: i32,
    pub description: Option<String>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        NewEvent {
            title: req.title,
            venue: req.venue,
            start_date: req.start_date,
            end_date: req.end_date,
            runtime_minutes: req.runtime_minutes,
            age_restriction: req.age_restriction,
            poster_url: req.poster_url,
            total_seats: req.total_seats,
            description: req.description,
        }
    }
}

/// Query string of the event status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusQuery {
    /// `ACTIVE` or `CANCELED`.
    pub status: String,
}
