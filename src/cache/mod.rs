//! Cache Module
//!
//! Short-lived copies of serialized products, keyed by product id. The
//! service talks to [`ProductCache`]; `redis` is the production backend and
//! `memory` is an in-process TTL map for local runs and tests.

mod entry;
mod memory;
mod redis;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use redis::RedisCache;

// == Public Constants ==
/// Prefix shared by every product cache key
pub const CACHE_KEY_PREFIX: &str = "product";

/// Lifetime of a cached product, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 100;

/// Builds the cache key for a product id, e.g. `product42`.
pub fn product_key(id: i64) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, id)
}

/// Byte-oriented key-value cache with per-entry expiration.
#[async_trait]
pub trait ProductCache: Send + Sync {
    /// Returns the stored payload, or `None` on a miss.
    ///
    /// A miss is not an error; `CacheUnavailable` means the cache could not
    /// be asked at all.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a payload that expires `ttl` from now.
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;
}
