//! Core traits defined in `seatguard-core` and implemented by other crates.

pub mod cache;
pub mod lock;

pub use cache::CacheProvider;
pub use lock::{LockClient, LockHandle};
