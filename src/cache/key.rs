//! Key namespacing.

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "cacher";

/// Maximum allowed logical key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Builds the key actually sent to the store: `"<prefix>:<key>"`.
pub fn namespaced_key(prefix: &str, key: &str) -> String {
    format!("{}:{}", prefix, key)
}
