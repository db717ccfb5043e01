//! Read-only reservation lookups.

use std::sync::Arc;

use seatguard_core::error::AppError;
use seatguard_core::result::AppResult;
use seatguard_core::types::id::{ReservationId, UserId};
use seatguard_database::store::BookingStore;
use seatguard_entity::reservation::{Reservation, ReservationDetail};

use crate::context::RequestContext;

/// Reservation reads. Never writes.
#[derive(Debug, Clone)]
pub struct ReservationQueryService {
    store: Arc<dyn BookingStore>,
}

impl ReservationQueryService {
    /// Creates a new query service.
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Get a reservation by ID.
    pub async fn get_reservation(&self, id: ReservationId) -> AppResult<Reservation> {
        self.store
            .find_reservation(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))
    }

    /// List a user's reservations, newest first. Callers may only list their own.
    pub async fn reservations_for_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<ReservationDetail>> {
        if !ctx.is_user(user_id) {
            return Err(AppError::forbidden(
                "Reservations of another user cannot be listed",
            ));
        }
        self.store.reservations_for_user(user_id).await
    }
}
