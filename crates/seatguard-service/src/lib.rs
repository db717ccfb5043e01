//! # seatguard-service
//!
//! Business logic for SeatGuard. The reservation path serializes the
//! "seat: available -> reserved" transition behind a per-seat lock and a
//! single store transaction; the catalog path serves cached listings that
//! every successful reservation invalidates.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod catalog;
pub mod context;
pub mod reservation;

pub use catalog::{CatalogCache, CatalogService};
pub use context::RequestContext;
pub use reservation::{
    ExecutionError, ReservationCoordinator, ReservationError, ReservationExecutor,
    ReservationQueryService,
};

#[cfg(test)]
pub(crate) mod testing;
