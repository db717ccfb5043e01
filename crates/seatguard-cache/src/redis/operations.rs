//! Redis cache provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use seatguard_core::error::{AppError, ErrorKind};
use seatguard_core::result::AppResult;
use seatguard_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// Redis-backed cache provider.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
    default_ttl: Duration,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient, default_ttl_seconds: u64) -> Self {
        Self {
            client,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    fn cache_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis cache command failed: {e}"), e)
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.connection();
        let value: Option<String> = conn
            .get(self.client.prefixed_key(key))
            .await
            .map_err(Self::cache_err)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.client.connection();
        // PSETEX rejects a zero TTL.
        let ttl_ms = (ttl.as_millis() as u64).max(1);
        let _: () = conn
            .pset_ex(self.client.prefixed_key(key), value, ttl_ms)
            .await
            .map_err(Self::cache_err)?;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.client.connection();
        let removed: u64 = conn
            .del(self.client.prefixed_key(key))
            .await
            .map_err(Self::cache_err)?;
        debug!(key, removed, "Cache key deleted");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.connection();
        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::cache_err)?;
        Ok(reply == "PONG")
    }
}
