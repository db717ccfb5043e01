//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seatguard_core::types::id::{EventId, ReservationId, SeatId, UserId};
use seatguard_entity::reservation::{Reservation, ReservationStatus};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Confirmation of a successful reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub seat_id: SeatId,
    pub reservation_date: DateTime<Utc>,
    pub status: ReservationStatus,
    pub total_price_cents: i64,
    pub message: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            reservation_id: r.id,
            user_id: r.user_id,
            event_id: r.event_id,
            seat_id: r.seat_id,
            reservation_date: r.reservation_date,
            status: r.status,
            total_price_cents: r.total_price_cents,
            message: "Reservation completed".to_string(),
        }
    }
}

/// Status of one backend dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// `up` or `down`.
    pub status: String,
    /// Failure detail, when down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is up, `degraded` otherwise.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Seconds since start.
    pub uptime_seconds: u64,
    pub store: ComponentHealth,
    pub cache: ComponentHealth,
    pub lock: ComponentHealth,
}
