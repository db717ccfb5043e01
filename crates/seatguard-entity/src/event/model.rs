//! Event entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use seatguard_core::types::id::EventId;

use super::status::EventStatus;

/// An event (performance), mapped from the `events` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub venue: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub runtime_minutes: Option<i32>,
    pub age_restriction: Option<String>,
    pub poster_url: Option<String>,
    /// Number of seats provisioned when the event was created.
    pub total_seats: i32,
    pub status: EventStatus,
    pub description: Option<String>,
}

/// Data for creating a new event. Seats are provisioned from `total_seats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub venue: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub runtime_minutes: Option<i32>,
    pub age_restriction: Option<String>,
    pub poster_url: Option<String>,
    pub total_seats: i32,
    pub description: Option<String>,
}

/// A catalog listing row: the event plus its count of open seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    /// Seats with `is_reserved = false`.
    pub available_seats: i64,
}
