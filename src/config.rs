//! Configuration Module
//!
//! Handles store connection settings and server configuration loaded from
//! environment variables.

use std::env;

use crate::cache::DEFAULT_PREFIX;

/// Default logical database selected on the store.
pub const DEFAULT_DATABASE_INDEX: i64 = 1;

// == Store Config ==
/// Where the backing store lives and which logical database to select.
///
/// Override only the fields you need:
/// ```
/// use cacher::StoreConfig;
///
/// let config = StoreConfig { port: 6380, ..Default::default() };
/// assert_eq!(config.database_index, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store hostname or IP address
    pub address: String,
    /// Store TCP port
    pub port: u16,
    /// Logical database index selected on connect
    pub database_index: i64,
}

impl StoreConfig {
    /// Connection URL understood by the redis client. The path component
    /// selects the logical database.
    pub fn connection_url(&self) -> String {
        format!(
            "redis://{}:{}/{}",
            self.address, self.port, self.database_index
        )
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 6379,
            database_index: DEFAULT_DATABASE_INDEX,
        }
    }
}

// == Backend Kind ==
/// Which backend the server binary wires the cacher to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Redis,
    Memory,
}

impl BackendKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(BackendKind::Redis),
            "memory" => Some(BackendKind::Memory),
            _ => None,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backing store location
    pub store: StoreConfig,
    /// Namespace prepended to every key
    pub prefix: String,
    /// TTL in seconds for HTTP writes that omit one
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Selected backend
    pub backend: BackendKind,
    /// Expiry sweep interval in seconds (in-memory backend only)
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_ADDRESS` - Store host (default: 127.0.0.1)
    /// - `REDIS_PORT` - Store port (default: 6379)
    /// - `REDIS_DB` - Logical database index (default: 1)
    /// - `CACHE_PREFIX` - Key prefix (default: cacher)
    /// - `DEFAULT_TTL` - TTL in seconds for writes without one (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHER_BACKEND` - `redis` or `memory` (default: redis)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            store: StoreConfig {
                address: env::var("REDIS_ADDRESS")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .unwrap_or(defaults.store.address),
                port: parse_var("REDIS_PORT").unwrap_or(defaults.store.port),
                database_index: parse_var("REDIS_DB").unwrap_or(defaults.store.database_index),
            },
            prefix: env::var("CACHE_PREFIX")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.prefix),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            backend: env::var("CACHER_BACKEND")
                .ok()
                .and_then(|v| BackendKind::parse(&v))
                .unwrap_or(defaults.backend),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            default_ttl: 300,
            server_port: 3000,
            backend: BackendKind::Redis,
            cleanup_interval: 1,
        }
    }
}
