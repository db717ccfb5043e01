//! Redis-based lock client using `SET NX PX` and Lua scripts.
//!
//! Suitable for multi-node deployments.

#[cfg(feature = "redis-lock")]
mod implementation {
    use std::time::Duration;

    use async_trait::async_trait;
    use redis::AsyncCommands;
    use redis::aio::ConnectionManager;
    use tokio::task::JoinHandle;
    use tracing::{debug, info, warn};

    use seatguard_core::config::lock::LockConfig;
    use seatguard_core::error::{AppError, ErrorKind};
    use seatguard_core::result::AppResult;
    use seatguard_core::traits::lock::{LockClient, LockHandle};

    /// Delete the key only while it still holds the caller's token.
    ///
    /// KEYS[1] = lock key
    /// ARGV[1] = owner token
    ///
    /// Returns 1 when deleted, 0 otherwise.
    const RELEASE_SCRIPT: &str = r#"
        if redis.call('GET', KEYS[1]) == ARGV[1] then
            return redis.call('DEL', KEYS[1])
        end
        return 0
    "#;

    /// Extend the lease only while the key still holds the caller's token.
    ///
    /// KEYS[1] = lock key
    /// ARGV[1] = owner token
    /// ARGV[2] = lease in milliseconds
    const RENEW_SCRIPT: &str = r#"
        if redis.call('GET', KEYS[1]) == ARGV[1] then
            return redis.call('PEXPIRE', KEYS[1], ARGV[2])
        end
        return 0
    "#;

    fn unavailable(context: &'static str) -> impl Fn(redis::RedisError) -> AppError {
        move |e| AppError::with_source(ErrorKind::LockUnavailable, format!("{context}: {e}"), e)
    }

    /// Redis-based lock client for multi-node deployments.
    #[derive(Debug, Clone)]
    pub struct RedisLockClient {
        conn: ConnectionManager,
        key_prefix: String,
        lease: Duration,
        retry_interval: Duration,
    }

    impl RedisLockClient {
        /// Connects to the lock Redis described by the configuration.
        pub async fn connect(config: &LockConfig) -> AppResult<Self> {
            let client = redis::Client::open(config.redis_url.as_str()).map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid lock Redis URL", e)
            })?;

            let conn = client
                .get_connection_manager()
                .await
                .map_err(unavailable("Failed to connect to lock Redis"))?;

            info!(
                key_prefix = %config.key_prefix,
                lease_ms = config.lease_ms,
                "Redis lock client initialized"
            );

            Ok(Self {
                conn,
                key_prefix: config.key_prefix.clone(),
                lease: Duration::from_millis(config.lease_ms),
                retry_interval: Duration::from_millis(config.retry_interval_ms),
            })
        }

        fn prefixed_key(&self, key: &str) -> String {
            format!("{}{key}", self.key_prefix)
        }

        fn lease_ms(&self) -> u64 {
            self.lease.as_millis() as u64
        }

        async fn try_claim(&self, full_key: &str, token: &str) -> AppResult<bool> {
            let mut conn = self.conn.clone();
            let reply: Option<String> = redis::cmd("SET")
                .arg(full_key)
                .arg(token)
                .arg("NX")
                .arg("PX")
                .arg(self.lease_ms())
                .query_async(&mut conn)
                .await
                .map_err(unavailable("Lock SET NX failed"))?;
            Ok(reply.is_some())
        }

        /// Removes a key this client may have set after its caller gave up.
        fn spawn_cleanup(&self, full_key: String, token: String) {
            let mut conn = self.conn.clone();
            tokio::spawn(async move {
                let result: redis::RedisResult<i64> = redis::Script::new(RELEASE_SCRIPT)
                    .key(&full_key)
                    .arg(&token)
                    .invoke_async(&mut conn)
                    .await;
                if let Err(e) = result {
                    debug!(key = %full_key, error = %e, "Lock cleanup after timeout failed");
                }
            });
        }

        fn acquired(&self, key: &str, full_key: String, token: String) -> LockHandle {
            let watchdog = self.spawn_watchdog(full_key, token.clone());
            debug!(key = %key, "Lock acquired via Redis");
            LockHandle::new(key, token, Some(watchdog))
        }

        fn spawn_watchdog(&self, full_key: String, token: String) -> JoinHandle<()> {
            let mut conn = self.conn.clone();
            let lease_ms = self.lease_ms();
            let period = crate::renew_period(self.lease);

            tokio::spawn(async move {
                let script = redis::Script::new(RENEW_SCRIPT);
                let mut ticker = tokio::time::interval(period);
                ticker.tick().await;

                loop {
                    ticker.tick().await;
                    let renewed: redis::RedisResult<i64> = script
                        .key(&full_key)
                        .arg(&token)
                        .arg(lease_ms)
                        .invoke_async(&mut conn)
                        .await;

                    match renewed {
                        Ok(1) => {}
                        Ok(_) => {
                            warn!(key = %full_key, "Lock lease lost, stopping renewal");
                            break;
                        }
                        Err(e) => {
                            warn!(key = %full_key, error = %e, "Lock lease renewal failed");
                        }
                    }
                }
            })
        }
    }

    #[async_trait]
    impl LockClient for RedisLockClient {
        async fn acquire(&self, key: &str, wait: Duration) -> AppResult<LockHandle> {
            let full_key = self.prefixed_key(key);
            let token = crate::new_token();

            // The first attempt is not bounded by `wait`, so a zero wait still
            // takes a free lock.
            if self.try_claim(&full_key, &token).await? {
                return Ok(self.acquired(key, full_key, token));
            }

            let attempts = async {
                loop {
                    tokio::time::sleep(self.retry_interval).await;
                    if self.try_claim(&full_key, &token).await? {
                        return Ok::<(), AppError>(());
                    }
                }
            };

            match tokio::time::timeout(wait, attempts).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(e),
                Err(_) => {
                    // A SET may have landed just as the deadline hit.
                    self.spawn_cleanup(full_key, token);
                    return Err(AppError::lock_timeout(format!(
                        "Timed out after {}ms waiting for lock '{key}'",
                        wait.as_millis()
                    )));
                }
            }

            Ok(self.acquired(key, full_key, token))
        }

        async fn release(&self, mut handle: LockHandle) -> AppResult<bool> {
            handle.stop_watchdog();

            let mut conn = self.conn.clone();
            let removed: i64 = redis::Script::new(RELEASE_SCRIPT)
                .key(self.prefixed_key(handle.key()))
                .arg(handle.token())
                .invoke_async(&mut conn)
                .await
                .map_err(unavailable("Lock release script failed"))?;

            if removed > 0 {
                debug!(
                    key = %handle.key(),
                    held_ms = handle.held_for().as_millis() as u64,
                    "Lock released via Redis"
                );
                Ok(true)
            } else {
                warn!(key = %handle.key(), "Release skipped: lock is no longer held by this handle");
                Ok(false)
            }
        }

        async fn is_locked(&self, key: &str) -> AppResult<bool> {
            let mut conn = self.conn.clone();
            conn.exists(self.prefixed_key(key))
                .await
                .map_err(unavailable("Lock EXISTS failed"))
        }

        async fn health_check(&self) -> AppResult<bool> {
            let mut conn = self.conn.clone();
            let pong: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(unavailable("Lock PING failed"))?;
            Ok(pong == "PONG")
        }
    }

}

#[cfg(feature = "redis-lock")]
pub use implementation::RedisLockClient;
