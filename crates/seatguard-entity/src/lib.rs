//! # seatguard-entity
//!
//! Domain entity models for SeatGuard. Every struct in this crate
//! represents a database table row or a read model joined from several.
//! All entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! database entities additionally derive `sqlx::FromRow`.

pub mod event;
pub mod reservation;
pub mod seat;

pub use event::{Event, EventStatus, EventSummary, NewEvent};
pub use reservation::{NewReservation, Reservation, ReservationDetail, ReservationStatus};
pub use seat::Seat;
