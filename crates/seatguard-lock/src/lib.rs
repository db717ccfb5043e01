//! # seatguard-lock
//!
//! Named mutual exclusion with an automatically renewed lease:
//! - Redis `SET NX PX` plus Lua scripts (for multi-node deployments)
//! - `DashMap` with lease instants (for single-node deployments)
//!
//! Every acquired lock carries a random owner token. Release and renewal
//! only act when the stored token still matches, so a holder whose lease
//! lapsed can never remove someone else's lock.

pub mod dispatch;
pub mod keys;
pub mod memory;
#[cfg(feature = "redis-lock")]
pub mod redis;

use std::time::Duration;

pub use dispatch::LockClientDispatch;
pub use memory::MemoryLockClient;
#[cfg(feature = "redis-lock")]
pub use crate::redis::RedisLockClient;

/// How often a watchdog renews a lease of the given length.
pub(crate) fn renew_period(lease: Duration) -> Duration {
    (lease / 3).max(Duration::from_millis(1))
}

/// A fresh random owner token.
pub(crate) fn new_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
