//! Backend seam between the cacher and the store that actually holds data.

use async_trait::async_trait;

use crate::error::Result;

/// Raw commands the cacher needs from a key-value store.
///
/// Keys arrive already namespaced and values already JSON-encoded. Reads hand
/// back the stored bytes untouched, since another writer may have left
/// something that is not UTF-8. Expiry is the store's job.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// GET: the stored bytes, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// SETEX: store `value` so that it expires `ttl_seconds` from now.
    ///
    /// A zero TTL is rejected as a store error, as Redis does.
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()>;

    /// EXPIRE: reset the time-to-live. Returns whether the key existed.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool>;

    /// DEL: returns whether a key was removed.
    async fn del(&self, key: &str) -> Result<bool>;

    /// Round trip used by health checks.
    async fn ping(&self) -> Result<()>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
