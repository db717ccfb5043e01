//! # seatguard-database
//!
//! PostgreSQL connection management, sqlx repositories, and the booking
//! and catalog stores the services run against. The in-memory store
//! implements the same traits for single-node deployments and tests.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::memory::MemoryStore;
pub use store::postgres::PgStore;
pub use store::{BookingStore, BookingTransaction, CatalogStore, InsertOutcome};
