//! Typed outcomes of the reservation path.

use thiserror::Error;

use seatguard_core::error::AppError;
use seatguard_core::types::id::SeatId;

/// Why the executor's transaction did not commit.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// No seat with this ID exists.
    #[error("seat {0} does not exist")]
    SeatNotFound(SeatId),
    /// The seat already belongs to a reservation.
    #[error("seat {0} is already reserved")]
    AlreadyReserved(SeatId),
    /// A write affected no rows.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
    /// The store itself failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

/// Outcome of a failed `reserve` call, as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// The seat does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The seat is already taken.
    #[error("{0}")]
    Conflict(String),
    /// The seat lock could not be obtained in time. Retry with backoff.
    #[error("{0}")]
    Busy(String),
    /// Anything else. The reservation was not made.
    #[error("{0}")]
    Internal(String),
}

impl ReservationError {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Busy(_) => "busy",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::NotFound(msg) => AppError::not_found(msg),
            ReservationError::Conflict(msg) => AppError::conflict(msg),
            ReservationError::Busy(msg) => AppError::lock_timeout(msg),
            ReservationError::Internal(msg) => AppError::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatguard_core::ErrorKind;

    #[test]
    fn test_maps_to_app_error_kinds() {
        let cases = [
            (ReservationError::NotFound("x".into()), ErrorKind::NotFound),
            (ReservationError::Conflict("x".into()), ErrorKind::Conflict),
            (ReservationError::Busy("x".into()), ErrorKind::LockTimeout),
            (ReservationError::Internal("x".into()), ErrorKind::Internal),
        ];
        for (err, kind) in cases {
            assert_eq!(AppError::from(err).kind, kind);
        }
    }

    #[test]
    fn test_busy_is_retryable() {
        assert!(AppError::from(ReservationError::Busy("retry".into())).is_retryable());
        assert!(!AppError::from(ReservationError::Conflict("taken".into())).is_retryable());
    }
}
