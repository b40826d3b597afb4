//! Request DTOs for the cacher HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for `PUT /data/:key`
///
/// # Fields
/// - `value`: Any JSON document to cache
/// - `ttl`: Optional TTL in seconds (uses the server default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for `POST /data/:key/ttl`
#[derive(Debug, Clone, Deserialize)]
pub struct TtlRequest {
    /// New TTL in seconds; 0 expires the entry
    pub ttl: u64,
}

/// Validates a logical key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"value": {"name": "a"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, json!({"name": "a"}));
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"value": [1, 2], "ttl": 15}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(15));
    }

    #[test]
    fn test_set_request_requires_value() {
        let result = serde_json::from_str::<SetRequest>(r#"{"ttl": 15}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ttl_request_deserialize() {
        let req: TtlRequest = serde_json::from_str(r#"{"ttl": 0}"#).unwrap();
        assert_eq!(req.ttl, 0);
    }

    #[test]
    fn test_validate_empty_key() {
        assert!(validate_key("").is_some());
    }

    #[test]
    fn test_validate_long_key() {
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH + 1)).is_some());
    }

    #[test]
    fn test_validate_valid_key() {
        assert!(validate_key("user:1").is_none());
    }
}
