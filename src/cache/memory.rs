//! In-Memory Cache Module
//!
//! HashMap storage with TTL expiration. Expired entries read as misses and
//! are swept by the background cleanup task.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CacheEntry, ProductCache};
use crate::error::Result;

// == Memory Cache ==
/// Process-local product cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ProductCache for MemoryCache {
    // == Get ==
    /// Expired entries are removed on access and reported as misses.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
        }
        Ok(None)
    }

    // == Put ==
    /// Overwrites any existing entry and resets its TTL.
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        Ok(())
    }
}
