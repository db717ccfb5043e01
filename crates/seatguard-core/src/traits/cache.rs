//! Key-value cache seam used by the catalog read path.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// A string cache with per-entry expiry.
///
/// Values are opaque JSON strings. Implementations own key namespacing;
/// callers pass bare keys such as `events:all_list`.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Returns `None` for absent or expired keys.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Like [`set`](Self::set) with the provider's configured TTL.
    async fn set_default(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    async fn health_check(&self) -> AppResult<bool>;
}
