//! Runtime selection between lock backends.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use seatguard_core::config::lock::LockConfig;
use seatguard_core::error::AppError;
use seatguard_core::result::AppResult;
use seatguard_core::traits::lock::{LockClient, LockHandle};

use crate::memory::MemoryLockClient;
#[cfg(feature = "redis-lock")]
use crate::redis::RedisLockClient;

/// Dispatcher for lock backends.
///
/// Switches between in-memory and Redis-based locking based on configuration.
#[derive(Debug, Clone)]
pub enum LockClientDispatch {
    /// In-memory locks (single node).
    Memory(MemoryLockClient),
    /// Redis-based locks (multi-node).
    #[cfg(feature = "redis-lock")]
    Redis(RedisLockClient),
}

impl LockClientDispatch {
    /// Builds the backend named by `lock.provider`.
    pub async fn from_config(config: &LockConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "memory" => {
                info!(lease_ms = config.lease_ms, "Using in-memory lock client");
                Ok(Self::Memory(MemoryLockClient::new(config)))
            }
            #[cfg(feature = "redis-lock")]
            "redis" => Ok(Self::Redis(RedisLockClient::connect(config).await?)),
            other => Err(AppError::configuration(format!(
                "Unknown lock provider: '{other}'. Supported: memory, redis"
            ))),
        }
    }
}

#[async_trait]
impl LockClient for LockClientDispatch {
    async fn acquire(&self, key: &str, wait: Duration) -> AppResult<LockHandle> {
        match self {
            Self::Memory(inner) => inner.acquire(key, wait).await,
            #[cfg(feature = "redis-lock")]
            Self::Redis(inner) => inner.acquire(key, wait).await,
        }
    }

    async fn release(&self, handle: LockHandle) -> AppResult<bool> {
        match self {
            Self::Memory(inner) => inner.release(handle).await,
            #[cfg(feature = "redis-lock")]
            Self::Redis(inner) => inner.release(handle).await,
        }
    }

    async fn is_locked(&self, key: &str) -> AppResult<bool> {
        match self {
            Self::Memory(inner) => inner.is_locked(key).await,
            #[cfg(feature = "redis-lock")]
            Self::Redis(inner) => inner.is_locked(key).await,
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        match self {
            Self::Memory(inner) => inner.health_check().await,
            #[cfg(feature = "redis-lock")]
            Self::Redis(inner) => inner.health_check().await,
        }
    }
}
