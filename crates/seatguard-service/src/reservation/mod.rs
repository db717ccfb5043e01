//! Seat reservation: lock coordination, the transactional executor, and reads.

pub mod coordinator;
pub mod error;
pub mod executor;
pub mod query;

pub use coordinator::ReservationCoordinator;
pub use error::{ExecutionError, ReservationError};
pub use executor::ReservationExecutor;
pub use query::ReservationQueryService;
