//! Redis-backed product cache

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::redis::{self, AsyncCommands};
use deadpool_redis::{Config, Pool, PoolConfig, Runtime};
use tracing::debug;

use super::ProductCache;
use crate::error::{ProductError, Result};

/// Product cache stored in Redis with `SET ... PX`.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Builds a pool for `url` and pings the server once.
    ///
    /// `timeout` bounds waiting for, creating and recycling connections.
    pub async fn connect(url: &str, pool_size: usize, timeout: Duration) -> Result<Self> {
        let mut pool_config = PoolConfig::new(pool_size);
        pool_config.timeouts.wait = Some(timeout);
        pool_config.timeouts.create = Some(timeout);
        pool_config.timeouts.recycle = Some(timeout);

        let mut config = Config::from_url(url);
        config.pool = Some(pool_config);

        let pool = config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| ProductError::CacheUnavailable(e.to_string()))?;

        let mut conn = pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProductCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.pool.get().await?;
        let value = conn.get::<_, Option<Vec<u8>>>(key).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let Some(ttl_ms) = expiry_millis(ttl) else {
            debug!(key = %key, "zero ttl, cache set skipped");
            return Ok(());
        };

        let mut conn = self.pool.get().await?;
        conn.pset_ex::<_, _, ()>(key, value, ttl_ms).await?;

        debug!(key = %key, ttl_ms, "cache set");
        Ok(())
    }
}

/// Millisecond expiry for `SET ... PX`.
///
/// `None` when the entry would already be expired, since Redis rejects a
/// zero expiry.
fn expiry_millis(ttl: Duration) -> Option<u64> {
    let ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
    (ms > 0).then_some(ms)
}
