//! Redis backend
//!
//! Talks to Redis through a `ConnectionManager`, which keeps one multiplexed
//! connection open and reconnects on failure. The logical database is
//! selected at connect time from the connection URL.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::cache::CacheBackend;
use crate::config::StoreConfig;
use crate::error::{CacheError, Result};

// == Redis Backend ==
/// Redis-backed store.
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
    url: String,
}

impl RedisBackend {
    // == Connect ==
    /// Connects to the configured address and selects the database index.
    ///
    /// Fails with `CacheError::Connection` when the server is unreachable or
    /// the select is refused.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        Self::connect_url(&config.connection_url()).await
    }

    /// Connects using a full `redis://` URL.
    pub async fn connect_url(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::Connection(format!("Invalid Redis URL {}: {}", url, e)))?;
        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to {}: {}", url, e)))?;

        info!("Connected to Redis at {}", url);

        Ok(Self {
            manager,
            url: url.to_string(),
        })
    }

    fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.connection();
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool> {
        let mut conn = self.connection();
        let seconds = i64::try_from(ttl_seconds).map_err(|_| {
            CacheError::InvalidRequest(format!("TTL {} is out of range", ttl_seconds))
        })?;
        let updated: bool = conn.expire(key, seconds).await?;
        Ok(updated)
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection();
        let removed: i64 = conn.del(key).await?;
        debug!("DEL {} removed {} key(s)", key, removed);
        Ok(removed > 0)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend").field("url", &self.url).finish()
    }
}
