//! In-memory backend
//!
//! Process-local stand-in for the store, with the same GET/SETEX/EXPIRE/DEL
//! semantics including expiry. Used by tests and by `CACHER_BACKEND=memory`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheBackend, CacheEntry};
use crate::error::{CacheError, Result};

// == Memory Backend ==
/// HashMap-backed store shared behind an async lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    // == Raw Insert ==
    /// Stores bytes without expiry, bypassing JSON encoding.
    pub async fn insert_raw(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), CacheEntry::persistent(value));
    }

    // == TTL ==
    /// Remaining seconds for a live key, `None` when absent or persistent.
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(|entry| entry.ttl_remaining())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Number of stored entries, expired ones included until purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it so it cannot be revived by EXPIRE.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired()) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        if ttl_seconds == 0 {
            return Err(CacheError::Store(
                "invalid expire time in 'setex' command".to_string(),
            ));
        }

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry::new(value, ttl_seconds));
        Ok(())
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool> {
        let mut entries = self.entries.write().await;
        let live = match entries.get(key) {
            None => return Ok(false),
            Some(entry) => !entry.is_expired(),
        };

        if !live || ttl_seconds == 0 {
            entries.remove(key);
        } else if let Some(entry) = entries.get_mut(key) {
            entry.expire_in(ttl_seconds);
        }
        Ok(live)
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        Ok(entries
            .remove(key)
            .is_some_and(|entry| !entry.is_expired()))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
