//! Cache Module
//!
//! JSON caching over a pluggable key-value backend (Redis in production,
//! an in-memory store for tests and local runs).

mod backend;
mod cacher;
mod entry;
mod key;
mod memory;
mod redis;
mod stats;


// Re-export public types
pub use backend::CacheBackend;
pub use cacher::{Cacher, MAX_TTL_SECONDS};
pub use entry::CacheEntry;
pub use key::{namespaced_key, DEFAULT_PREFIX, MAX_KEY_LENGTH};
pub use memory::MemoryBackend;
pub use self::redis::RedisBackend;
pub use stats::{CacheStats, StatsRecorder};
