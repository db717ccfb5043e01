//! Seat reservation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use seatguard_core::types::id::{ReservationId, UserId};
use seatguard_entity::reservation::{Reservation, ReservationDetail};

use crate::dto::request::CreateReservationRequest;
use crate::dto::response::{ApiResponse, ReservationResponse};
use crate::error::ApiResult;
use crate::extractors::TrustedUser;
use crate::state::AppState;

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    user: TrustedUser,
    Json(req): Json<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ReservationResponse>>)> {
    let reservation = state
        .coordinator
        .reserve(user.user_id, req.event_id, req.seat_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ReservationResponse::from(reservation))),
    ))
}

/// GET /api/reservations/{id}
pub async fn get_reservation(
    State(state): State<AppState>,
    _user: TrustedUser,
    Path(id): Path<ReservationId>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservation_queries.get_reservation(id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// GET /api/reservations/user/{user_id}
pub async fn list_user_reservations(
    State(state): State<AppState>,
    user: TrustedUser,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<ApiResponse<Vec<ReservationDetail>>>> {
    let reservations = state
        .reservation_queries
        .reservations_for_user(user.context(), user_id)
        .await?;
    Ok(Json(ApiResponse::ok(reservations)))
}
