//! Cache Entry Module
//!
//! Stored form of a value inside the in-memory backend: the raw payload
//! bytes plus the expiry the store enforces.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single stored value with its expiration deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Payload bytes exactly as written
    pub value: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry that expires `ttl_seconds` from now.
    ///
    /// A TTL of zero yields an entry that is already expired.
    pub fn new(value: impl Into<Vec<u8>>, ttl_seconds: u64) -> Self {
        Self {
            value: value.into(),
            expires_at: Some(deadline(current_timestamp_ms(), ttl_seconds)),
        }
    }

    // == Persistent ==
    /// Creates an entry without expiration.
    pub fn persistent(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    // == Expire ==
    /// Moves the deadline to `ttl_seconds` from now.
    pub fn expire_in(&mut self, ttl_seconds: u64) {
        self.expires_at = Some(deadline(current_timestamp_ms(), ttl_seconds));
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the deadline, so a
    /// zero TTL expires immediately.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }

    /// Returns remaining TTL in seconds, or None if no expiration is set.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.ttl_remaining_ms().map(|ms| ms / 1000)
    }
}

fn deadline(now_ms: u64, ttl_seconds: u64) -> u64 {
    now_ms.saturating_add(ttl_seconds.saturating_mul(1000))
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
