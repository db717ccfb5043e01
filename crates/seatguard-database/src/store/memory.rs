//! In-memory booking and catalog store.
//!
//! Suitable for single-node deployments and tests. A transaction stages its
//! writes locally and applies them under the state mutex on commit, after
//! re-checking that every staged seat is still open.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use seatguard_core::error::AppError;
use seatguard_core::result::AppResult;
use seatguard_core::types::id::{EventId, ReservationId, SeatId, UserId};
use seatguard_entity::event::{Event, EventStatus, EventSummary, NewEvent};
use seatguard_entity::reservation::{NewReservation, Reservation, ReservationDetail};
use seatguard_entity::seat::Seat;

use super::{BookingStore, BookingTransaction, CatalogStore, InsertOutcome};

#[derive(Debug, Default)]
struct MemoryState {
    events: BTreeMap<EventId, Event>,
    seats: BTreeMap<SeatId, Seat>,
    reservations: BTreeMap<ReservationId, Reservation>,
    last_event_id: i64,
    last_seat_id: i64,
    last_reservation_id: i64,
}

impl MemoryState {
    fn next_event_id(&mut self) -> EventId {
        self.last_event_id += 1;
        EventId(self.last_event_id)
    }

    fn next_seat_id(&mut self) -> SeatId {
        self.last_seat_id += 1;
        SeatId(self.last_seat_id)
    }

    fn next_reservation_id(&mut self) -> ReservationId {
        self.last_reservation_id += 1;
        ReservationId(self.last_reservation_id)
    }
}

/// Store that keeps everything in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reservations that reference `seat_id`.
    pub async fn reservation_count_for_seat(&self, seat_id: SeatId) -> usize {
        let state = self.state.lock().await;
        state
            .reservations
            .values()
            .filter(|r| r.seat_id == seat_id)
            .count()
    }
}

/// Writes staged by one [`MemoryStore`] transaction.
#[derive(Debug)]
pub struct MemoryTransaction {
    state: Arc<Mutex<MemoryState>>,
    reservations: Vec<Reservation>,
    seats: Vec<Seat>,
}

impl MemoryTransaction {
    fn staged_seat(&self, seat_id: SeatId) -> Option<&Seat> {
        self.seats.iter().rev().find(|s| s.id == seat_id)
    }
}

#[async_trait]
impl BookingTransaction for MemoryTransaction {
    async fn read_seat(&mut self, seat_id: SeatId) -> AppResult<Option<Seat>> {
        if let Some(seat) = self.staged_seat(seat_id) {
            return Ok(Some(seat.clone()));
        }
        let state = self.state.lock().await;
        Ok(state.seats.get(&seat_id).cloned())
    }

    async fn insert_reservation(
        &mut self,
        reservation: &NewReservation,
    ) -> AppResult<InsertOutcome> {
        let id = {
            let mut state = self.state.lock().await;
            if !state.seats.contains_key(&reservation.seat_id) {
                return Err(AppError::database(format!(
                    "Reservation references unknown seat {}",
                    reservation.seat_id
                )));
            }
            state.next_reservation_id()
        };

        self.reservations.push(reservation.clone().into_reservation(id));
        Ok(InsertOutcome::inserted(id))
    }

    async fn update_seat(&mut self, seat: &Seat) -> AppResult<u64> {
        if self.staged_seat(seat.id).is_some_and(|s| s.is_reserved) {
            return Ok(0);
        }
        let open = {
            let state = self.state.lock().await;
            state.seats.get(&seat.id).is_some_and(Seat::is_available)
        };
        if !open {
            return Ok(0);
        }
        self.seats.push(seat.clone());
        Ok(1)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let mut state = self.state.lock().await;

        for seat in &self.seats {
            let still_open = state.seats.get(&seat.id).is_some_and(Seat::is_available);
            if !still_open {
                warn!(seat_id = %seat.id, "Commit rejected: seat changed since it was staged");
                return Err(AppError::persistence(format!(
                    "Seat {} was modified by a concurrent transaction",
                    seat.id
                )));
            }
        }

        for reservation in &self.reservations {
            state.reservations.insert(reservation.id, reservation.clone());
        }
        for seat in &self.seats {
            state.seats.insert(seat.id, seat.clone());
        }

        debug!(
            reservations = self.reservations.len(),
            seats = self.seats.len(),
            "Memory transaction committed"
        );
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        debug!(
            discarded_reservations = self.reservations.len(),
            "Memory transaction rolled back"
        );
        Ok(())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn BookingTransaction>> {
        Ok(Box::new(MemoryTransaction {
            state: Arc::clone(&self.state),
            reservations: Vec::new(),
            seats: Vec::new(),
        }))
    }

    async fn find_reservation(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        let state = self.state.lock().await;
        Ok(state.reservations.get(&id).cloned())
    }

    async fn reservations_for_user(&self, user_id: UserId) -> AppResult<Vec<ReservationDetail>> {
        let state = self.state.lock().await;

        let mut details: Vec<ReservationDetail> = state
            .reservations
            .values()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                let event = state.events.get(&r.event_id)?;
                let seat = state.seats.get(&r.seat_id)?;
                Some(ReservationDetail {
                    id: r.id,
                    user_id: r.user_id,
                    event_id: r.event_id,
                    seat_id: r.seat_id,
                    reservation_date: r.reservation_date,
                    status: r.status,
                    total_price_cents: r.total_price_cents,
                    event_title: event.title.clone(),
                    event_start_date: event.start_date,
                    seat_code: seat.seat_code.clone(),
                })
            })
            .collect();

        details.sort_by(|a, b| {
            b.reservation_date
                .cmp(&a.reservation_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(details)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_event_summaries(&self) -> AppResult<Vec<EventSummary>> {
        let state = self.state.lock().await;
        Ok(state
            .events
            .values()
            .map(|event| EventSummary {
                event: event.clone(),
                available_seats: state
                    .seats
                    .values()
                    .filter(|s| s.event_id == event.id && s.is_available())
                    .count() as i64,
            })
            .collect())
    }

    async fn find_event(&self, id: EventId) -> AppResult<Option<Event>> {
        let state = self.state.lock().await;
        Ok(state.events.get(&id).cloned())
    }

    async fn seats_by_event(&self, event_id: EventId) -> AppResult<Vec<Seat>> {
        let state = self.state.lock().await;
        Ok(state
            .seats
            .values()
            .filter(|s| s.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn available_seats_by_event(&self, event_id: EventId) -> AppResult<Vec<Seat>> {
        let state = self.state.lock().await;
        Ok(state
            .seats
            .values()
            .filter(|s| s.event_id == event_id && s.is_available())
            .cloned()
            .collect())
    }

    async fn find_seat(&self, id: SeatId) -> AppResult<Option<Seat>> {
        let state = self.state.lock().await;
        Ok(state.seats.get(&id).cloned())
    }

    async fn create_event(&self, event: &NewEvent, seat_price_cents: i64) -> AppResult<Event> {
        if event.total_seats < 0 {
            return Err(AppError::validation("total_seats must not be negative"));
        }

        let mut state = self.state.lock().await;
        let id = state.next_event_id();
        let created = Event {
            id,
            title: event.title.clone(),
            venue: event.venue.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            runtime_minutes: event.runtime_minutes,
            age_restriction: event.age_restriction.clone(),
            poster_url: event.poster_url.clone(),
            total_seats: event.total_seats,
            status: EventStatus::Active,
            description: event.description.clone(),
        };
        state.events.insert(id, created.clone());

        for n in 1..=event.total_seats {
            let seat_id = state.next_seat_id();
            state.seats.insert(
                seat_id,
                Seat {
                    id: seat_id,
                    event_id: id,
                    seat_code: format!("A-{n}"),
                    price_cents: seat_price_cents,
                    is_reserved: false,
                    reservation_id: None,
                },
            );
        }

        debug!(event_id = %id, seats = event.total_seats, "Event created");
        Ok(created)
    }

    async fn update_event_status(&self, id: EventId, status: EventStatus) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.events.get_mut(&id) {
            Some(event) => {
                event.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
