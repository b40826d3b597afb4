//! Error types for the cacher
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// A cache miss is never an error: `get_data` reports it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Store unreachable, connection dropped, or database select failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Command-level failure reported by the store
    #[error("Store error: {0}")]
    Store(String),

    /// Nothing stored under the key (only raised by `set_ttl`)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Value could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The fallback producer of a read-through call failed
    #[error("Fallback failed: {0}")]
    Fallback(#[source] anyhow::Error),
}

// == Redis Error Conversion ==
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            CacheError::Connection(err.to_string())
        } else {
            CacheError::Store(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) | CacheError::Serialization(_) => StatusCode::BAD_REQUEST,
            CacheError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Store(_) => StatusCode::BAD_GATEWAY,
            CacheError::Fallback(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use redis::{ErrorKind, RedisError};

    #[test]
    fn test_io_error_maps_to_connection() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: CacheError = RedisError::from(io).into();
        assert!(matches!(err, CacheError::Connection(_)));
    }

    #[test]
    fn test_response_error_maps_to_store() {
        let redis_err = RedisError::from((ErrorKind::ResponseError, "invalid expire time"));
        let err: CacheError = redis_err.into();
        assert!(matches!(err, CacheError::Store(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (CacheError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (CacheError::InvalidRequest("k".into()), StatusCode::BAD_REQUEST),
            (CacheError::Connection("down".into()), StatusCode::SERVICE_UNAVAILABLE),
            (CacheError::Store("oops".into()), StatusCode::BAD_GATEWAY),
            (
                CacheError::Fallback(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
