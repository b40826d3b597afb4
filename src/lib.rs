//! Cacher - JSON caching helpers over Redis
//!
//! Get/set/expire/delete of JSON values under a configurable key prefix,
//! plus a read-through helper that fills the cache on a miss.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{
    namespaced_key, CacheBackend, CacheStats, Cacher, MemoryBackend, RedisBackend, DEFAULT_PREFIX,
    MAX_TTL_SECONDS,
};
pub use config::{BackendKind, Config, StoreConfig};
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
