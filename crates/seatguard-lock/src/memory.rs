//! In-memory lock client.
//!
//! Suitable for single-node deployments. Each key maps to the owner token
//! and the instant its lease runs out; an expired entry is free to claim.
//! Entries left behind by dropped handles are swept on every release, so
//! the map only holds live leases plus whatever lapsed since the last one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use seatguard_core::config::lock::LockConfig;
use seatguard_core::error::AppError;
use seatguard_core::result::AppResult;
use seatguard_core::traits::lock::{LockClient, LockHandle};

#[derive(Debug)]
struct LockEntry {
    token: String,
    expires_at: Instant,
}

/// Lock client backed by a concurrent map.
#[derive(Debug, Clone)]
pub struct MemoryLockClient {
    entries: Arc<DashMap<String, LockEntry>>,
    /// Wakes waiters as soon as any key is released.
    released: Arc<Notify>,
    lease: Duration,
    retry_interval: Duration,
}

impl MemoryLockClient {
    /// Creates a lock client from configuration.
    pub fn new(config: &LockConfig) -> Self {
        Self::with_timing(
            Duration::from_millis(config.lease_ms),
            Duration::from_millis(config.retry_interval_ms),
        )
    }

    /// Creates a lock client with explicit lease and poll interval.
    pub fn with_timing(lease: Duration, retry_interval: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            released: Arc::new(Notify::new()),
            lease,
            retry_interval,
        }
    }

    fn try_claim(&self, key: &str, token: &str) -> bool {
        let now = Instant::now();
        let claimed = LockEntry {
            token: token.to_string(),
            expires_at: now + self.lease,
        };

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut held) => {
                if held.get().expires_at > now {
                    return false;
                }
                debug!(key = %key, "Claiming lock whose lease expired");
                held.insert(claimed);
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(claimed);
                true
            }
        }
    }

    fn sweep_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|key, entry| {
            let live = entry.expires_at > now;
            if !live {
                debug!(key = %key, "Sweeping lapsed lock entry");
            }
            live
        });
    }

    fn spawn_watchdog(&self, key: String, token: String) -> JoinHandle<()> {
        let entries = Arc::clone(&self.entries);
        let lease = self.lease;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(crate::renew_period(lease));
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let now = Instant::now();
                let renewed = match entries.get_mut(&key) {
                    Some(mut entry) if entry.token == token && entry.expires_at > now => {
                        entry.expires_at = now + lease;
                        true
                    }
                    _ => false,
                };

                if !renewed {
                    warn!(key = %key, "Lock lease lost, stopping renewal");
                    break;
                }
            }
        })
    }
}

#[async_trait]
impl LockClient for MemoryLockClient {
    async fn acquire(&self, key: &str, wait: Duration) -> AppResult<LockHandle> {
        let token = crate::new_token();
        let deadline = Instant::now() + wait;

        loop {
            // Registered before the claim attempt so a release in between still wakes us.
            let released = self.released.notified();

            if self.try_claim(key, &token) {
                let watchdog = self.spawn_watchdog(key.to_string(), token.clone());
                debug!(key = %key, "Lock acquired");
                return Ok(LockHandle::new(key, token, Some(watchdog)));
            }

            let now = Instant::now();
            if now >= deadline {
                debug!(key = %key, wait_ms = wait.as_millis() as u64, "Lock wait timed out");
                return Err(AppError::lock_timeout(format!(
                    "Timed out after {}ms waiting for lock '{key}'",
                    wait.as_millis()
                )));
            }

            let nap = self.retry_interval.min(deadline - now);
            let _ = tokio::time::timeout(nap, released).await;
        }
    }

    async fn release(&self, mut handle: LockHandle) -> AppResult<bool> {
        handle.stop_watchdog();

        let removed = self
            .entries
            .remove_if(handle.key(), |_, entry| entry.token == handle.token());

        let released = match removed {
            Some((_, entry)) => {
                self.released.notify_waiters();
                entry.expires_at > Instant::now()
            }
            None => false,
        };
        self.sweep_expired();

        if released {
            debug!(
                key = %handle.key(),
                held_ms = handle.held_for().as_millis() as u64,
                "Lock released"
            );
        } else {
            warn!(key = %handle.key(), "Release skipped: lock is no longer held by this handle");
        }
        Ok(released)
    }

    async fn is_locked(&self, key: &str) -> AppResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .get(key)
            .is_some_and(|entry| entry.expires_at > now))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
