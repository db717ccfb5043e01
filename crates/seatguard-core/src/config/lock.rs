//! Distributed lock configuration.

use serde::{Deserialize, Serialize};

/// Lock backend and lease timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
    /// Lock provider: `"memory"` (single node) or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis connection URL used when `provider = "redis"`.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// Namespace prepended to every lock key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Lease length in milliseconds. The watchdog renews it every third.
    #[serde(default = "default_lease_ms")]
    pub lease_ms: u64,
    /// Delay between acquisition attempts while waiting.
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis_url: default_redis_url(),
            key_prefix: default_key_prefix(),
            lease_ms: default_lease_ms(),
            retry_interval_ms: default_retry_interval_ms(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "seatguard:lock:".to_string()
}

fn default_lease_ms() -> u64 {
    30_000
}

fn default_retry_interval_ms() -> u64 {
    50
}
