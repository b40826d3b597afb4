//! Cacher
//!
//! JSON get/set/expire/delete over a [`CacheBackend`], with every key
//! namespaced as `"<prefix>:<key>"`, plus a read-through helper that fills
//! the cache on a miss.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{namespaced_key, CacheBackend, CacheStats, StatsRecorder, DEFAULT_PREFIX};
use crate::error::{CacheError, Result};

/// Longest TTL accepted by `set_data` and `set_ttl`, about 136 years.
///
/// Redis refuses expiry times whose millisecond deadline overflows, so larger
/// values are rejected before reaching any backend.
pub const MAX_TTL_SECONDS: u64 = u32::MAX as u64;

// == Cacher ==
/// Cheaply clonable handle over a shared backend.
///
/// Configuration is fixed at construction; clones share the backend and the
/// counters.
#[derive(Clone)]
pub struct Cacher {
    backend: Arc<dyn CacheBackend>,
    prefix: Arc<str>,
    stats: Arc<StatsRecorder>,
}

impl Cacher {
    // == Constructors ==
    /// Creates a cacher using the default `"cacher"` prefix.
    pub fn new(backend: impl CacheBackend + 'static) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Creates a cacher over an already shared backend.
    pub fn from_shared(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            prefix: Arc::from(DEFAULT_PREFIX),
            stats: Arc::new(StatsRecorder::new()),
        }
    }

    /// Returns a cacher that namespaces keys under `prefix` instead.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        self.prefix = Arc::from(prefix);
        self
    }

    // == Accessors ==
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The key sent to the store for a logical `key`.
    pub fn key(&self, key: &str) -> String {
        namespaced_key(&self.prefix, key)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Checks that the backend answers.
    pub async fn ping(&self) -> Result<()> {
        self.track(self.backend.ping().await)
    }

    // == Get ==
    /// Reads and decodes the value stored under `key`.
    ///
    /// A miss is `Ok(None)`. So is a stored payload that is not valid JSON,
    /// is JSON `null`, or does not decode into `T`.
    pub async fn get_data<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let full_key = self.key(key);
        let raw = self.track(self.backend.get(&full_key).await)?;

        let Some(bytes) = raw else {
            debug!("Cache miss: {}", full_key);
            self.stats.record_miss();
            return Ok(None);
        };

        match decode::<T>(&bytes) {
            Ok(Some(value)) => {
                debug!("Cache hit: {}", full_key);
                self.stats.record_hit();
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("Cache miss (null payload): {}", full_key);
                self.stats.record_miss();
                Ok(None)
            }
            Err(e) => {
                warn!("Ignoring undecodable payload at {}: {}", full_key, e);
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Set ==
    /// Encodes `value` as JSON and stores it for `ttl_seconds`.
    ///
    /// The TTL is handed to the store unchanged, so a zero TTL comes back as
    /// the store's error. TTLs above [`MAX_TTL_SECONDS`] are rejected.
    pub async fn set_data<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> Result<()> {
        check_ttl(ttl_seconds)?;
        let full_key = self.key(key);
        let text = serde_json::to_string(value)?;

        self.track(self.backend.set_ex(&full_key, &text, ttl_seconds).await)?;
        debug!("Cached {} for {}s", full_key, ttl_seconds);
        Ok(())
    }

    // == Set TTL ==
    /// Resets the expiry of an existing entry and returns its value.
    ///
    /// Fails with `CacheError::NotFound` when nothing is stored. A failed
    /// expiry update is logged, not returned: the caller still gets the
    /// value that was read.
    pub async fn set_ttl<T: DeserializeOwned>(&self, key: &str, ttl_seconds: u64) -> Result<T> {
        check_ttl(ttl_seconds)?;
        let value = self
            .get_data::<T>(key)
            .await?
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        let full_key = self.key(key);
        match self.backend.expire(&full_key, ttl_seconds).await {
            Ok(true) => debug!("Expiry of {} set to {}s", full_key, ttl_seconds),
            Ok(false) => debug!("{} vanished before its expiry could be set", full_key),
            Err(e) => {
                self.stats.record_error();
                warn!("Failed to set expiry of {}: {}", full_key, e);
            }
        }

        Ok(value)
    }

    // == Delete ==
    /// Removes `key`. Succeeds whether or not it existed.
    pub async fn delete_data(&self, key: &str) -> Result<()> {
        let full_key = self.key(key);
        let removed = self.track(self.backend.del(&full_key).await)?;
        debug!("Deleted {} (existed: {})", full_key, removed);
        Ok(())
    }

    // == Get With Fallback ==
    /// Read-through: returns the cached value, or computes it with `fallback`,
    /// stores it for `ttl_seconds`, and returns it.
    ///
    /// Store errors on the read are returned without calling `fallback`.
    /// Failing to store the computed value is logged and does not fail the
    /// call. Concurrent misses each run their own `fallback`.
    pub async fn get_data_with_fallback<T, F, Fut>(
        &self,
        key: &str,
        ttl_seconds: u64,
        fallback: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        if let Some(cached) = self.get_data::<T>(key).await? {
            return Ok(cached);
        }

        self.stats.record_fallback();
        let value = fallback().await.map_err(CacheError::Fallback)?;

        if let Err(e) = self.set_data(key, &value, ttl_seconds).await {
            warn!(
                "Fallback for {} succeeded but caching the result failed: {}",
                self.key(key),
                e
            );
        }

        Ok(value)
    }

    fn track<R>(&self, result: Result<R>) -> Result<R> {
        if result.is_err() {
            self.stats.record_error();
        }
        result
    }
}

impl std::fmt::Debug for Cacher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cacher")
            .field("backend", &self.backend.name())
            .field("prefix", &self.prefix)
            .finish()
    }
}

fn check_ttl(ttl_seconds: u64) -> Result<()> {
    if ttl_seconds > MAX_TTL_SECONDS {
        return Err(CacheError::InvalidRequest(format!(
            "TTL {} exceeds the maximum of {} seconds",
            ttl_seconds, MAX_TTL_SECONDS
        )));
    }
    Ok(())
}

/// JSON `null` decodes to `None`, like an absent key. Bytes that are not
/// UTF-8 fail like any other malformed payload.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<Option<T>> {
    let value: Value = serde_json::from_slice(bytes)?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some)
}
