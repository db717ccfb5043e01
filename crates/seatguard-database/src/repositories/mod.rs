//! Repository implementations for the booking tables.
//!
//! Reads that are part of the booking transaction take an explicit
//! `&mut PgConnection` so they run on the transaction's connection;
//! everything else runs on the pool.

pub mod event;
pub mod reservation;
pub mod seat;

pub use event::EventRepository;
pub use reservation::ReservationRepository;
pub use seat::SeatRepository;

use seatguard_core::error::{AppError, ErrorKind};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a write error, turning unique-constraint violations into conflicts.
pub(crate) fn map_write_error(err: sqlx::Error, context: &str) -> AppError {
    let is_unique = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);

    if is_unique {
        AppError::with_source(ErrorKind::Conflict, format!("{context}: duplicate row"), err)
    } else {
        AppError::with_source(ErrorKind::Database, context.to_string(), err)
    }
}
