//! Event catalog handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use seatguard_core::error::AppError;
use seatguard_core::types::id::{EventId, SeatId};
use seatguard_entity::event::{Event, EventStatus, EventSummary};
use seatguard_entity::seat::Seat;

use crate::dto::request::{CreateEventRequest, StatusQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<EventSummary>>>> {
    let events = state.catalog.list_events().await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> ApiResult<Json<ApiResponse<Event>>> {
    let event = state.catalog.get_event(id).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// GET /api/events/{id}/seats
pub async fn list_seats(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> ApiResult<Json<ApiResponse<Vec<Seat>>>> {
    let seats = state.catalog.list_seats(id).await?;
    Ok(Json(ApiResponse::ok(seats)))
}

/// GET /api/events/{id}/seats/available
pub async fn list_available_seats(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> ApiResult<Json<ApiResponse<Vec<Seat>>>> {
    let seats = state.catalog.available_seats(id).await?;
    Ok(Json(ApiResponse::ok(seats)))
}

/// GET /api/seats/{id}
pub async fn get_seat(
    State(state): State<AppState>,
    Path(id): Path<SeatId>,
) -> ApiResult<Json<ApiResponse<Seat>>> {
    let seat = state.catalog.get_seat(id).await?;
    Ok(Json(ApiResponse::ok(seat)))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<EventSummary>>)> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid event: {e}")))?;

    let summary = state.catalog.create_event(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(summary))))
}

/// PATCH /api/events/{id}/status?status=...
pub async fn update_event_status(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<ApiResponse<Event>>> {
    let status: EventStatus = query.status.parse()?;

    if !state.catalog.update_event_status(id, status).await? {
        return Err(AppError::not_found(format!("Event {id} not found")).into());
    }

    let event = state.catalog.get_event(id).await?;
    Ok(Json(ApiResponse::ok(event)))
}
