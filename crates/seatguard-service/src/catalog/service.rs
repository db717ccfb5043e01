//! Catalog service: event listings, seat listings, and provisioning.

use std::sync::Arc;

use tracing::info;

use seatguard_cache::keys;
use seatguard_core::config::reservation::CatalogConfig;
use seatguard_core::error::AppError;
use seatguard_core::result::AppResult;
use seatguard_core::types::id::{EventId, SeatId};
use seatguard_database::store::CatalogStore;
use seatguard_entity::event::{Event, EventStatus, EventSummary, NewEvent};
use seatguard_entity::seat::Seat;

use super::cache::CatalogCache;

/// Read and administrative operations on events and seats.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    cache: Arc<CatalogCache>,
    seat_price_cents: i64,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(store: Arc<dyn CatalogStore>, cache: Arc<CatalogCache>, config: &CatalogConfig) -> Self {
        Self {
            store,
            cache,
            seat_price_cents: config.default_seat_price_cents,
        }
    }

    /// Every event with its open-seat count.
    pub async fn list_events(&self) -> AppResult<Vec<EventSummary>> {
        self.cache
            .get_or_compute(&keys::event_listing(), || self.store.list_event_summaries())
            .await
    }

    /// Seats of an event in seat order. Unknown events have no seats.
    pub async fn list_seats(&self, event_id: EventId) -> AppResult<Vec<Seat>> {
        self.cache
            .get_or_compute(&keys::event_seats(event_id), || {
                self.store.seats_by_event(event_id)
            })
            .await
    }

    /// Open seats of an event, read straight from the store.
    pub async fn available_seats(&self, event_id: EventId) -> AppResult<Vec<Seat>> {
        self.store.available_seats_by_event(event_id).await
    }

    /// Get a seat by ID.
    pub async fn get_seat(&self, seat_id: SeatId) -> AppResult<Seat> {
        self.store
            .find_seat(seat_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Seat {seat_id} not found")))
    }

    /// Get an event by ID.
    pub async fn get_event(&self, event_id: EventId) -> AppResult<Event> {
        self.store
            .find_event(event_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event {event_id} not found")))
    }

    /// Create an `ACTIVE` event and provision its seats.
    pub async fn create_event(&self, new_event: NewEvent) -> AppResult<EventSummary> {
        if new_event.title.trim().is_empty() {
            return Err(AppError::validation("Event title must not be empty"));
        }
        if new_event.total_seats <= 0 {
            return Err(AppError::validation("Event must have at least one seat"));
        }
        if let (Some(start), Some(end)) = (new_event.start_date, new_event.end_date) {
            if end < start {
                return Err(AppError::validation("Event end date precedes its start date"));
            }
        }

        let event = self
            .store
            .create_event(&new_event, self.seat_price_cents)
            .await?;

        info!(
            event_id = %event.id,
            total_seats = event.total_seats,
            "Event created"
        );

        // A seat listing read before the event existed may already be cached.
        self.cache.evict_after_change(event.id).await;

        let available_seats = i64::from(event.total_seats);
        Ok(EventSummary {
            event,
            available_seats,
        })
    }

    /// Change an event's status. Returns `false` if the event does not exist.
    pub async fn update_event_status(&self, event_id: EventId, status: EventStatus) -> AppResult<bool> {
        let updated = self.store.update_event_status(event_id, status).await?;
        if updated {
            info!(event_id = %event_id, status = %status, "Event status updated");
            self.cache.evict_after_change(event_id).await;
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use seatguard_core::error::ErrorKind;
    use seatguard_database::MemoryStore;

    use super::*;
    use crate::testing::{failing_cache, memory_cache, new_event};

    fn service(store: &MemoryStore) -> CatalogService {
        let config = CatalogConfig::default();
        let cache = Arc::new(CatalogCache::new(memory_cache(), &config));
        CatalogService::new(Arc::new(store.clone()), cache, &config)
    }

    #[tokio::test]
    async fn test_create_event_provisions_seats() {
        let store = MemoryStore::new();
        let catalog = service(&store);

        let summary = catalog.create_event(new_event(3)).await.unwrap();
        assert_eq!(summary.event.status, EventStatus::Active);
        assert_eq!(summary.available_seats, 3);

        let seats = catalog.list_seats(summary.event.id).await.unwrap();
        let codes: Vec<_> = seats.iter().map(|s| s.seat_code.as_str()).collect();
        assert_eq!(codes, ["A-1", "A-2", "A-3"]);
        assert!(seats.iter().all(|s| s.price_cents == 100_000 && s.is_available()));
    }

    #[tokio::test]
    async fn test_create_event_rejects_invalid_input() {
        let catalog = service(&MemoryStore::new());

        let err = catalog.create_event(new_event(0)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut untitled = new_event(1);
        untitled.title = "  ".to_string();
        let err = catalog.create_event(untitled).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_listing_is_evicted_on_create() {
        let store = MemoryStore::new();
        let catalog = service(&store);

        assert!(catalog.list_events().await.unwrap().is_empty());
        catalog.create_event(new_event(2)).await.unwrap();

        let events = catalog.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].available_seats, 2);
    }

    #[tokio::test]
    async fn test_seat_listing_read_before_create_is_refreshed() {
        let store = MemoryStore::new();
        let catalog = service(&store);

        assert!(catalog.list_seats(EventId(1)).await.unwrap().is_empty());

        let summary = catalog.create_event(new_event(3)).await.unwrap();
        assert_eq!(summary.event.id, EventId(1));
        assert_eq!(catalog.list_seats(EventId(1)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = MemoryStore::new();
        let catalog = service(&store);
        let summary = catalog.create_event(new_event(1)).await.unwrap();

        assert!(catalog
            .update_event_status(summary.event.id, EventStatus::Canceled)
            .await
            .unwrap());
        let listed = catalog.list_events().await.unwrap();
        assert_eq!(listed[0].event.status, EventStatus::Canceled);

        assert!(!catalog
            .update_event_status(EventId(999), EventStatus::Canceled)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_missing_seat_and_event() {
        let catalog = service(&MemoryStore::new());

        assert_eq!(catalog.get_seat(SeatId(1)).await.unwrap_err().kind, ErrorKind::NotFound);
        assert_eq!(catalog.get_event(EventId(1)).await.unwrap_err().kind, ErrorKind::NotFound);
        assert!(catalog.list_seats(EventId(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_survive_cache_outage() {
        let store = MemoryStore::new();
        let config = CatalogConfig::default();
        let catalog = CatalogService::new(
            Arc::new(store.clone()),
            Arc::new(CatalogCache::new(failing_cache(), &config)),
            &config,
        );

        let summary = catalog.create_event(new_event(2)).await.unwrap();
        assert_eq!(catalog.list_events().await.unwrap().len(), 1);
        assert_eq!(catalog.list_seats(summary.event.id).await.unwrap().len(), 2);
        assert_eq!(catalog.available_seats(summary.event.id).await.unwrap().len(), 2);
    }
}
