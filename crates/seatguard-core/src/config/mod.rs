//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section falls back to its defaults when absent.

pub mod app;
pub mod cache;
pub mod database;
pub mod lock;
pub mod logging;
pub mod reservation;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::cache::CacheConfig;
use self::database::{DatabaseConfig, StoreConfig};
use self::lock::LockConfig;
use self::logging::LoggingConfig;
use self::reservation::{CatalogConfig, ReservationConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Booking/catalog store selection.
    #[serde(default)]
    pub store: StoreConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Distributed lock settings.
    #[serde(default)]
    pub lock: LockConfig,
    /// Reservation coordinator settings.
    #[serde(default)]
    pub reservation: ReservationConfig,
    /// Event catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SEATGUARD__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SEATGUARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.lock.provider, "memory");
        assert_eq!(config.lock.lease_ms, 30_000);
        assert_eq!(config.lock.retry_interval_ms, 50);
        assert_eq!(config.reservation.lock_wait_ms, 3_000);
        assert_eq!(config.catalog.default_seat_price_cents, 100_000);
        assert_eq!(config.store.provider, "memory");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let raw = r#"
            [lock]
            provider = "redis"
            lease_ms = 9000

            [reservation]
            lock_wait_ms = 250
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("config should parse");

        assert_eq!(config.lock.provider, "redis");
        assert_eq!(config.lock.lease_ms, 9000);
        assert_eq!(config.lock.retry_interval_ms, 50);
        assert_eq!(config.reservation.lock_wait_ms, 250);
        assert_eq!(config.cache.provider, "memory");
    }
}
