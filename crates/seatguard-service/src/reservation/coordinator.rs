//! Reservation entry point.
//!
//! Per request: `lock_wait -> locked -> executing -> done | failed`, or
//! `lock_wait -> timeout`. The locked section runs on its own task, so a
//! caller that goes away mid-request cannot leave the lock held or the
//! cache stale.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use seatguard_core::config::reservation::ReservationConfig;
use seatguard_core::error::ErrorKind;
use seatguard_core::traits::lock::{LockClient, LockHandle};
use seatguard_core::types::id::{EventId, SeatId, UserId};
use seatguard_entity::reservation::Reservation;
use seatguard_lock::keys;

use super::error::{ExecutionError, ReservationError};
use super::executor::ReservationExecutor;
use crate::catalog::CatalogCache;

/// Serializes reservations of a seat behind that seat's lock.
#[derive(Debug, Clone)]
pub struct ReservationCoordinator {
    locks: Arc<dyn LockClient>,
    executor: ReservationExecutor,
    catalog_cache: Arc<CatalogCache>,
    lock_wait: Duration,
}

impl ReservationCoordinator {
    /// Creates a new coordinator.
    pub fn new(
        locks: Arc<dyn LockClient>,
        executor: ReservationExecutor,
        catalog_cache: Arc<CatalogCache>,
        config: &ReservationConfig,
    ) -> Self {
        Self {
            locks,
            executor,
            catalog_cache,
            lock_wait: Duration::from_millis(config.lock_wait_ms),
        }
    }

    /// Reserve `seat_id` for `user_id`.
    ///
    /// At most one call per seat ever succeeds. Losers get `Conflict`, or
    /// `Busy` when the lock could not be had within the wait bound.
    pub async fn reserve(
        &self,
        user_id: UserId,
        event_id: EventId,
        seat_id: SeatId,
    ) -> Result<Reservation, ReservationError> {
        let key = keys::seat_lock(seat_id);
        debug!(state = "lock_wait", seat_id = %seat_id, user_id = %user_id, "Waiting for seat lock");

        let handle = match self.locks.acquire(&key, self.lock_wait).await {
            Ok(handle) => handle,
            Err(e) if e.kind == ErrorKind::LockTimeout => {
                warn!(
                    state = "timeout",
                    seat_id = %seat_id,
                    user_id = %user_id,
                    wait_ms = self.lock_wait.as_millis() as u64,
                    "Seat lock wait timed out"
                );
                return Err(ReservationError::Busy(
                    "too many concurrent attempts for this seat, retry later".to_string(),
                ));
            }
            Err(e) => {
                error!(
                    state = "failed",
                    seat_id = %seat_id,
                    user_id = %user_id,
                    error = %e,
                    "Seat lock could not be acquired"
                );
                return Err(ReservationError::Internal(
                    "reservation service unavailable".to_string(),
                ));
            }
        };
        debug!(state = "locked", seat_id = %seat_id, "Seat lock acquired");

        let this = self.clone();
        let locked = tokio::spawn(async move {
            this.run_locked(handle, user_id, event_id, seat_id).await
        });

        match locked.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                error!(seat_id = %seat_id, error = %join_err, "Locked section aborted");
                Err(ReservationError::Internal(
                    "reservation aborted unexpectedly".to_string(),
                ))
            }
        }
    }

    async fn run_locked(
        &self,
        handle: LockHandle,
        user_id: UserId,
        event_id: EventId,
        seat_id: SeatId,
    ) -> Result<Reservation, ReservationError> {
        debug!(state = "executing", seat_id = %seat_id, "Running reservation transaction");
        let outcome = self.executor.execute(user_id, event_id, seat_id).await;

        let key = handle.key().to_string();
        match self.locks.release(handle).await {
            Ok(true) => {}
            Ok(false) => warn!(key = %key, "Seat lock lapsed before release"),
            Err(e) => error!(key = %key, error = %e, "Seat lock release failed"),
        }

        match outcome {
            Ok(reservation) => {
                self.catalog_cache
                    .evict_after_reservation(reservation.event_id)
                    .await;
                info!(
                    state = "done",
                    reservation_id = %reservation.id,
                    seat_id = %seat_id,
                    user_id = %user_id,
                    "Seat reserved"
                );
                Ok(reservation)
            }
            Err(err) => {
                let mapped = match err {
                    ExecutionError::AlreadyReserved(_) => {
                        ReservationError::Conflict("seat already taken".to_string())
                    }
                    ExecutionError::SeatNotFound(_) => {
                        ReservationError::NotFound("seat does not exist".to_string())
                    }
                    ExecutionError::PersistenceFailure(msg) => ReservationError::Internal(msg),
                    ExecutionError::Store(e) => ReservationError::Internal(e.message),
                };
                info!(
                    state = "failed",
                    outcome = mapped.label(),
                    seat_id = %seat_id,
                    user_id = %user_id,
                    "Reservation not made"
                );
                Err(mapped)
            }
        }
    }
}
