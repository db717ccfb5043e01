//! # seatguard-core
//!
//! Core crate for SeatGuard. Contains the configuration schema, typed
//! identifiers, the cache and lock traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SeatGuard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
