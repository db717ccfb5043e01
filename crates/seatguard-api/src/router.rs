//! Route definitions for the SeatGuard HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes, threading `AppState` through.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(reservation_routes())
        .merge(event_routes())
        .merge(seat_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Seat reservation and reservation lookups
fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations",
            post(handlers::reservation::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(handlers::reservation::get_reservation),
        )
        .route(
            "/reservations/user/{user_id}",
            get(handlers::reservation::list_user_reservations),
        )
}

/// Event catalog and provisioning
fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(handlers::event::list_events).post(handlers::event::create_event),
        )
        .route("/events/{id}", get(handlers::event::get_event))
        .route("/events/{id}/seats", get(handlers::event::list_seats))
        .route(
            "/events/{id}/seats/available",
            get(handlers::event::list_available_seats),
        )
        .route(
            "/events/{id}/status",
            patch(handlers::event::update_event_status),
        )
}

/// Single-seat lookups
fn seat_routes() -> Router<AppState> {
    Router::new().route("/seats/{id}", get(handlers::event::get_seat))
}

/// Health check endpoints (no identity required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
