//! # seatguard-api
//!
//! HTTP API layer for SeatGuard built on Axum.
//!
//! Provides the REST endpoints, middleware (request logging, CORS),
//! the trusted-identity extractor, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
