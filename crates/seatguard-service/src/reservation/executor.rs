//! The transactional unit of a reservation.
//!
//! Runs only while the caller holds the seat lock. It re-reads the seat,
//! writes the reservation, and flips the seat in one transaction; every
//! failure branch rolls back before returning.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use seatguard_core::error::ErrorKind;
use seatguard_core::types::id::{EventId, SeatId, UserId};
use seatguard_database::store::{BookingStore, BookingTransaction};
use seatguard_entity::reservation::{NewReservation, Reservation, ReservationStatus};

use super::error::ExecutionError;

/// Executes the seat-reservation transaction.
#[derive(Debug, Clone)]
pub struct ReservationExecutor {
    store: Arc<dyn BookingStore>,
}

impl ReservationExecutor {
    /// Creates a new executor over a booking store.
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Reserve `seat_id` for `user_id` and commit.
    pub async fn execute(
        &self,
        user_id: UserId,
        event_id: EventId,
        seat_id: SeatId,
    ) -> Result<Reservation, ExecutionError> {
        let mut tx = self.store.begin().await?;

        match Self::apply(tx.as_mut(), user_id, event_id, seat_id).await {
            Ok(reservation) => {
                tx.commit().await?;
                info!(
                    reservation_id = %reservation.id,
                    seat_id = %seat_id,
                    user_id = %user_id,
                    "Reservation committed"
                );
                Ok(reservation)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(
                        seat_id = %seat_id,
                        error = %rollback_err,
                        "Rollback failed"
                    );
                }
                match &err {
                    ExecutionError::SeatNotFound(_) | ExecutionError::AlreadyReserved(_) => {
                        warn!(seat_id = %seat_id, user_id = %user_id, reason = %err, "Reservation rejected");
                    }
                    _ => {
                        error!(seat_id = %seat_id, user_id = %user_id, error = %err, "Reservation failed");
                    }
                }
                Err(err)
            }
        }
    }

    async fn apply(
        tx: &mut dyn BookingTransaction,
        user_id: UserId,
        event_id: EventId,
        seat_id: SeatId,
    ) -> Result<Reservation, ExecutionError> {
        let seat = tx
            .read_seat(seat_id)
            .await?
            .ok_or(ExecutionError::SeatNotFound(seat_id))?;

        if seat.is_reserved {
            return Err(ExecutionError::AlreadyReserved(seat_id));
        }

        if seat.event_id != event_id {
            warn!(
                seat_id = %seat_id,
                requested_event_id = %event_id,
                seat_event_id = %seat.event_id,
                "Requested event does not own this seat; using the seat's event"
            );
        }

        let new_reservation = NewReservation {
            user_id,
            event_id: seat.event_id,
            seat_id,
            reservation_date: Utc::now(),
            status: ReservationStatus::Complete,
            total_price_cents: seat.price_cents,
        };

        let outcome = match tx.insert_reservation(&new_reservation).await {
            Ok(outcome) => outcome,
            Err(e) if e.kind == ErrorKind::Conflict => {
                return Err(ExecutionError::AlreadyReserved(seat_id));
            }
            Err(e) => return Err(e.into()),
        };

        let reservation_id = match outcome.id {
            Some(id) if outcome.rows_affected > 0 => id,
            _ => {
                return Err(ExecutionError::PersistenceFailure(
                    "reservation insert affected no rows".to_string(),
                ));
            }
        };

        let reserved = seat
            .reserve(reservation_id)
            .map_err(|_| ExecutionError::AlreadyReserved(seat_id))?;

        if tx.update_seat(&reserved).await? == 0 {
            return Err(ExecutionError::PersistenceFailure(
                "seat update affected no rows".to_string(),
            ));
        }

        Ok(new_reservation.into_reservation(reservation_id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use seatguard_core::result::AppResult;
    use seatguard_core::types::id::ReservationId;
    use seatguard_database::MemoryStore;
    use seatguard_database::store::{CatalogStore, InsertOutcome};
    use seatguard_entity::reservation::ReservationDetail;
    use seatguard_entity::seat::Seat;

    use super::*;
    use crate::testing::seeded_store;

    #[derive(Debug, Clone, Copy)]
    enum Fault {
        InsertNoRows,
        UpdateNoRows,
    }

    /// Wraps a memory store and makes one write report zero rows.
    #[derive(Debug)]
    struct FaultyStore {
        inner: MemoryStore,
        fault: Fault,
        rolled_back: Arc<AtomicBool>,
    }

    struct FaultyTransaction {
        inner: Box<dyn BookingTransaction>,
        fault: Fault,
        rolled_back: Arc<AtomicBool>,
    }

    #[async_trait]
    impl BookingTransaction for FaultyTransaction {
        async fn read_seat(&mut self, seat_id: SeatId) -> AppResult<Option<Seat>> {
            self.inner.read_seat(seat_id).await
        }

        async fn insert_reservation(
            &mut self,
            reservation: &NewReservation,
        ) -> AppResult<InsertOutcome> {
            match self.fault {
                Fault::InsertNoRows => Ok(InsertOutcome::empty()),
                Fault::UpdateNoRows => self.inner.insert_reservation(reservation).await,
            }
        }

        async fn update_seat(&mut self, seat: &Seat) -> AppResult<u64> {
            match self.fault {
                Fault::UpdateNoRows => Ok(0),
                Fault::InsertNoRows => self.inner.update_seat(seat).await,
            }
        }

        async fn commit(self: Box<Self>) -> AppResult<()> {
            self.inner.commit().await
        }

        async fn rollback(self: Box<Self>) -> AppResult<()> {
            self.rolled_back.store(true, Ordering::SeqCst);
            self.inner.rollback().await
        }
    }

    #[async_trait]
    impl BookingStore for FaultyStore {
        async fn begin(&self) -> AppResult<Box<dyn BookingTransaction>> {
            Ok(Box::new(FaultyTransaction {
                inner: self.inner.begin().await?,
                fault: self.fault,
                rolled_back: Arc::clone(&self.rolled_back),
            }))
        }

        async fn find_reservation(
            &self,
            id: ReservationId,
        ) -> AppResult<Option<Reservation>> {
            self.inner.find_reservation(id).await
        }

        async fn reservations_for_user(
            &self,
            user_id: UserId,
        ) -> AppResult<Vec<ReservationDetail>> {
            self.inner.reservations_for_user(user_id).await
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_execute_reserves_open_seat() {
        let (store, event_id, seats) = seeded_store(2).await;
        let executor = ReservationExecutor::new(Arc::new(store.clone()));

        let reservation = executor
            .execute(UserId(1), event_id, seats[0].id)
            .await
            .expect("reserve");

        assert_eq!(reservation.status, ReservationStatus::Complete);
        assert_eq!(reservation.total_price_cents, 100_000);
        assert_eq!(reservation.seat_id, seats[0].id);

        let seat = store.find_seat(seats[0].id).await.unwrap().unwrap();
        assert!(seat.is_reserved);
        assert_eq!(seat.reservation_id, Some(reservation.id));
        assert_eq!(
            store.find_reservation(reservation.id).await.unwrap(),
            Some(reservation)
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_reserved_seat() {
        let (store, event_id, seats) = seeded_store(1).await;
        let executor = ReservationExecutor::new(Arc::new(store.clone()));

        executor.execute(UserId(1), event_id, seats[0].id).await.expect("first");
        let err = executor
            .execute(UserId(2), event_id, seats[0].id)
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::AlreadyReserved(id) if id == seats[0].id));
        assert_eq!(store.reservation_count_for_seat(seats[0].id).await, 1);
    }

    #[tokio::test]
    async fn test_execute_missing_seat() {
        let (store, event_id, _) = seeded_store(1).await;
        let executor = ReservationExecutor::new(Arc::new(store));

        let err = executor
            .execute(UserId(1), event_id, SeatId(9_999))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::SeatNotFound(SeatId(9_999))));
    }

    #[tokio::test]
    async fn test_event_mismatch_uses_seat_event() {
        let (store, event_id, seats) = seeded_store(1).await;
        let executor = ReservationExecutor::new(Arc::new(store));

        let reservation = executor
            .execute(UserId(1), EventId(event_id.get() + 100), seats[0].id)
            .await
            .expect("reserve");
        assert_eq!(reservation.event_id, event_id);
    }

    #[tokio::test]
    async fn test_insert_without_rows_rolls_back() {
        let (store, event_id, seats) = seeded_store(1).await;
        let rolled_back = Arc::new(AtomicBool::new(false));
        let executor = ReservationExecutor::new(Arc::new(FaultyStore {
            inner: store.clone(),
            fault: Fault::InsertNoRows,
            rolled_back: Arc::clone(&rolled_back),
        }));

        let err = executor
            .execute(UserId(1), event_id, seats[0].id)
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::PersistenceFailure(_)));
        assert!(rolled_back.load(Ordering::SeqCst));
        assert!(store.find_seat(seats[0].id).await.unwrap().unwrap().is_available());
    }

    #[tokio::test]
    async fn test_update_without_rows_rolls_back_reservation() {
        let (store, event_id, seats) = seeded_store(1).await;
        let rolled_back = Arc::new(AtomicBool::new(false));
        let executor = ReservationExecutor::new(Arc::new(FaultyStore {
            inner: store.clone(),
            fault: Fault::UpdateNoRows,
            rolled_back: Arc::clone(&rolled_back),
        }));

        let err = executor
            .execute(UserId(1), event_id, seats[0].id)
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::PersistenceFailure(_)));
        assert!(rolled_back.load(Ordering::SeqCst));
        assert_eq!(store.reservation_count_for_seat(seats[0].id).await, 0);
    }
}
