//! Response DTOs for the cacher HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for `GET /data/:key`; `value` is null on a miss.
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The cached value, if any
    pub value: Option<Value>,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for `PUT /data/:key`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// TTL applied, in seconds
    pub ttl: u64,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, ttl: u64) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            ttl,
        }
    }
}

/// Response body for `POST /data/:key/ttl`
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    /// The refreshed key
    pub key: String,
    /// Value read before the expiry was reset
    pub value: Value,
    /// New TTL in seconds
    pub ttl: u64,
}

impl TtlResponse {
    pub fn new(key: impl Into<String>, value: Value, ttl: u64) -> Self {
        Self {
            key: key.into(),
            value,
            ttl,
        }
    }
}

/// Response body for `DELETE /data/:key`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of fallback invocations
    pub fallbacks: u64,
    /// Number of store failures
    pub errors: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Backend in use
    pub backend: String,
    /// Key prefix in use
    pub prefix: String,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, backend: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            fallbacks: stats.fallbacks,
            errors: stats.errors,
            hit_rate: stats.hit_rate(),
            backend: backend.into(),
            prefix: prefix.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status ("healthy" or "unhealthy")
    pub status: String,
    /// Backend in use
    pub backend: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Why the backend check failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    /// Creates a healthy HealthResponse with current timestamp
    pub fn healthy(backend: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            backend: backend.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            error: None,
        }
    }

    /// Creates an unhealthy HealthResponse carrying the failure
    pub fn unhealthy(backend: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            backend: backend.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            error: Some(error.into()),
        }
    }
}
