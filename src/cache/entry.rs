//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A serialized payload and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after now.
    pub fn new(value: Vec<u8>, ttl: Duration) -> Self {
        let now = current_timestamp_ms();

        Self {
            value,
            expires_at: now.saturating_add(ttl.as_millis() as u64),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
