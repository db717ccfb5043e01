//! Named mutual-exclusion locks with a renewed lease.

use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::result::AppResult;

/// Proof of a held lock.
///
/// The handle carries the owner token that `release` compares against, and
/// the watchdog task that keeps the lease alive. Dropping a handle without
/// releasing it stops the watchdog, so the lease lapses on its own.
#[derive(Debug)]
pub struct LockHandle {
    key: String,
    token: String,
    acquired_at: Instant,
    watchdog: Option<JoinHandle<()>>,
}

impl LockHandle {
    /// Build a handle for a freshly acquired key.
    pub fn new(
        key: impl Into<String>,
        token: impl Into<String>,
        watchdog: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            key: key.into(),
            token: token.into(),
            acquired_at: Instant::now(),
            watchdog,
        }
    }

    /// The unprefixed lock key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The random owner token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Time elapsed since acquisition.
    pub fn held_for(&self) -> Duration {
        self.acquired_at.elapsed()
    }

    /// Abort lease renewal. Idempotent.
    pub fn stop_watchdog(&mut self) {
        if let Some(watchdog) = self.watchdog.take() {
            watchdog.abort();
        }
    }
}

impl Drop for LockHandle {
    fn drop(&mut self) {
        self.stop_watchdog();
    }
}

/// Trait for distributed lock backends.
///
/// Two implementations are provided:
/// - Redis-based (`SET NX PX` plus Lua compare-and-delete), for multiple nodes
/// - In-memory (`DashMap` with lease instants), for a single node
#[async_trait]
pub trait LockClient: Send + Sync + std::fmt::Debug + 'static {
    /// Acquire `key`, waiting at most `wait` for the current holder.
    ///
    /// Fails with `ErrorKind::LockTimeout` when the wait elapses and with
    /// `ErrorKind::LockUnavailable` when the backend cannot be reached.
    async fn acquire(&self, key: &str, wait: Duration) -> AppResult<LockHandle>;

    /// Release a held lock.
    ///
    /// Returns `false` when the handle no longer owns the key (its lease
    /// expired and someone else may hold it now); the current holder is
    /// never disturbed.
    async fn release(&self, handle: LockHandle) -> AppResult<bool>;

    /// Whether `key` is currently held by anyone.
    async fn is_locked(&self, key: &str) -> AppResult<bool>;

    /// Check that the lock backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drop_aborts_watchdog() {
        let watchdog = tokio::spawn(async {
            loop {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        });
        let abort = watchdog.abort_handle();
        let handle = LockHandle::new("seat:1", "token", Some(watchdog));
        assert_eq!(handle.key(), "seat:1");
        assert_eq!(handle.token(), "token");

        drop(handle);
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(abort.is_finished());
    }
}
