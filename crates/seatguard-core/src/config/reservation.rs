//! Reservation and catalog configuration.

use serde::{Deserialize, Serialize};

/// Reservation coordinator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfig {
    /// How long a request waits for the seat lock before giving up.
    #[serde(default = "default_lock_wait_ms")]
    pub lock_wait_ms: u64,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            lock_wait_ms: default_lock_wait_ms(),
        }
    }
}

/// Event catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Price assigned to every provisioned seat, in minor units.
    #[serde(default = "default_seat_price_cents")]
    pub default_seat_price_cents: i64,
    /// TTL for cached listings in seconds; `0` uses the cache default.
    #[serde(default)]
    pub listing_ttl_seconds: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_seat_price_cents: default_seat_price_cents(),
            listing_ttl_seconds: 0,
        }
    }
}

fn default_lock_wait_ms() -> u64 {
    3_000
}

fn default_seat_price_cents() -> i64 {
    100_000
}
