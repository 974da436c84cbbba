//! Product Service
//!
//! Reads check the cache first and fall back to the store on a miss, then
//! populate the cache with a fixed TTL. Writes go straight to the store and
//! leave the cache alone, so a cached copy can be stale for at most one TTL.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::cache::{product_key, ProductCache, DEFAULT_CACHE_TTL_SECS};
use crate::error::{ProductError, Result};
use crate::models::{NewProduct, Product};
use crate::store::ProductStore;

/// Upper bound for any single store or cache call
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(2000);

// == Product Service ==
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    cache: Arc<dyn ProductCache>,
    /// Lifetime of entries written on a cache miss
    ttl: Duration,
    /// Bound applied to each store and cache call
    op_timeout: Duration,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, cache: Arc<dyn ProductCache>) -> Self {
        Self {
            store,
            cache,
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            op_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_operation_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    // == Write Path ==
    /// Stores a new product and returns its assigned id.
    pub async fn add_product(&self, product: NewProduct) -> Result<i64> {
        let id = bounded(self.op_timeout, self.store.create(product), || {
            ProductError::Persistence("insert timed out".to_string())
        })
        .await?;

        debug!(id, "product created");
        Ok(id)
    }

    // == Read Path ==
    /// Returns the product with `id`, serving from cache when possible.
    ///
    /// Cache failures never fail the read: an unreachable cache or an
    /// undecodable entry falls through to the store, and a failed write-back
    /// is only logged.
    pub async fn get_product(&self, id: i64) -> Result<Product> {
        let key = product_key(id);

        match self.lookup_cached(&key).await {
            Ok(Some(product)) => {
                debug!(key = %key, "cache hit");
                return Ok(product);
            }
            Ok(None) => debug!(key = %key, "cache miss"),
            Err(err @ ProductError::CorruptCacheEntry { .. }) => {
                warn!(error = %err, "discarding cached product");
            }
            Err(err) => {
                warn!(key = %key, error = %err, "cache lookup failed, reading from store");
            }
        }

        let product = bounded(self.op_timeout, self.store.fetch_by_id(id), || {
            ProductError::Persistence(format!("fetch of product {} timed out", id))
        })
        .await?;

        self.populate_cache(&key, &product).await;
        Ok(product)
    }

    async fn lookup_cached(&self, key: &str) -> Result<Option<Product>> {
        let cached = bounded(self.op_timeout, self.cache.get(key), || {
            ProductError::CacheUnavailable("lookup timed out".to_string())
        })
        .await?;

        cached.map(|bytes| decode_product(key, &bytes)).transpose()
    }

    async fn populate_cache(&self, key: &str, product: &Product) {
        let payload = match serde_json::to_vec(product) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(key = %key, error = %err, "could not serialize product for cache");
                return;
            }
        };

        let write = bounded(self.op_timeout, self.cache.put(key, payload, self.ttl), || {
            ProductError::CacheUnavailable("write timed out".to_string())
        });

        if let Err(err) = write.await {
            warn!(key = %key, error = %err, "cache write-back skipped");
        }
    }
}

/// Decodes cached bytes, reporting failures as `CorruptCacheEntry`.
fn decode_product(key: &str, bytes: &[u8]) -> Result<Product> {
    serde_json::from_slice(bytes).map_err(|err| ProductError::CorruptCacheEntry {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

/// Runs `fut` for at most `limit`, mapping expiry through `on_timeout`.
async fn bounded<T, F, E>(limit: Duration, fut: F, on_timeout: E) -> Result<T>
where
    F: Future<Output = Result<T>>,
    E: FnOnce() -> ProductError,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::cache::MemoryCache;
    use crate::store::MemoryProductStore;

    // == Test Doubles ==
    /// Counts fetches so tests can tell cache hits from store reads.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryProductStore,
        fetches: AtomicUsize,
    }

    impl CountingStore {
        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductStore for CountingStore {
        async fn create(&self, product: NewProduct) -> Result<i64> {
            self.inner.create(product).await
        }

        async fn fetch_by_id(&self, id: i64) -> Result<Product> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_by_id(id).await
        }
    }

    /// A cache whose every call fails.
    struct UnavailableCache;

    #[async_trait]
    impl ProductCache for UnavailableCache {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(ProductError::CacheUnavailable("connection refused".to_string()))
        }

        async fn put(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<()> {
            Err(ProductError::CacheUnavailable("connection refused".to_string()))
        }
    }

    /// A cache that never answers within the test timeout.
    struct StalledCache;

    #[async_trait]
    impl ProductCache for StalledCache {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }

        async fn put(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
    }

    /// A store that never answers within the test timeout.
    struct StalledStore;

    #[async_trait]
    impl ProductStore for StalledStore {
        async fn create(&self, _product: NewProduct) -> Result<i64> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(1)
        }

        async fn fetch_by_id(&self, id: i64) -> Result<Product> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Err(ProductError::NotFound(id))
        }
    }

    fn widget() -> NewProduct {
        NewProduct::new("Widget", "9.99", "tools")
    }

    fn setup() -> (ProductService, Arc<CountingStore>, Arc<MemoryCache>) {
        let store = Arc::new(CountingStore::default());
        let cache = Arc::new(MemoryCache::new());
        let service = ProductService::new(store.clone(), cache.clone());
        (service, store, cache)
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let (service, _, _) = setup();

        let id = service.add_product(widget()).await.unwrap();
        let product = service.get_product(id).await.unwrap();

        assert_eq!(id, 1);
        assert_eq!(product, widget().with_id(1));
    }

    #[tokio::test]
    async fn test_write_does_not_touch_cache() {
        let (service, _, cache) = setup();

        service.add_product(widget()).await.unwrap();

        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (service, _, cache) = setup();

        let err = service.get_product(404).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(404)));
        assert!(cache.is_empty().await, "Misses must not be cached");
    }

    #[tokio::test]
    async fn test_second_read_served_from_cache() {
        let (service, store, cache) = setup();
        let id = service.add_product(widget()).await.unwrap();

        let first = service.get_product(id).await.unwrap();
        let second = service.get_product(id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.fetches(), 1);
        assert!(cache.get(&product_key(id)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_read_after_ttl_hits_store_again() {
        let store = Arc::new(CountingStore::default());
        let service = ProductService::new(store.clone(), Arc::new(MemoryCache::new()))
            .with_ttl(Duration::from_millis(50));
        let id = service.add_product(widget()).await.unwrap();

        service.get_product(id).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        service.get_product(id).await.unwrap();

        assert_eq!(store.fetches(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_cache_falls_back_to_store() {
        let store = Arc::new(CountingStore::default());
        let service = ProductService::new(store.clone(), Arc::new(UnavailableCache));
        let id = service.add_product(widget()).await.unwrap();

        let first = service.get_product(id).await.unwrap();
        let second = service.get_product(id).await.unwrap();

        assert_eq!(first, widget().with_id(id));
        assert_eq!(first, second);
        assert_eq!(store.fetches(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_replaced() {
        let (service, store, cache) = setup();
        let id = service.add_product(widget()).await.unwrap();
        let key = product_key(id);
        cache
            .put(&key, b"{not json".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();

        let product = service.get_product(id).await.unwrap();

        assert_eq!(product, widget().with_id(id));
        assert_eq!(store.fetches(), 1);

        let cached = cache.get(&key).await.unwrap().unwrap();
        assert_eq!(decode_product(&key, &cached).unwrap(), product);
    }

    #[tokio::test]
    async fn test_store_timeout_is_persistence_error() {
        let service = ProductService::new(Arc::new(StalledStore), Arc::new(MemoryCache::new()))
            .with_operation_timeout(Duration::from_millis(50));

        let read = service.get_product(1).await.unwrap_err();
        let write = service.add_product(widget()).await.unwrap_err();

        assert!(matches!(read, ProductError::Persistence(_)));
        assert!(matches!(write, ProductError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_stalled_cache_falls_back_to_store() {
        let store = Arc::new(CountingStore::default());
        let service = ProductService::new(store.clone(), Arc::new(StalledCache))
            .with_operation_timeout(Duration::from_millis(50));
        let id = service.add_product(widget()).await.unwrap();

        let started = std::time::Instant::now();
        let product = service.get_product(id).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(product, widget().with_id(id));
        assert_eq!(store.fetches(), 1);
        // One bounded lookup plus one bounded write-back
        assert!(elapsed < Duration::from_secs(1), "read took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_cache_lookup_timeout_is_cache_unavailable() {
        let service = ProductService::new(
            Arc::new(MemoryProductStore::new()),
            Arc::new(StalledCache),
        )
        .with_operation_timeout(Duration::from_millis(50));

        let err = service.lookup_cached(&product_key(1)).await.unwrap_err();

        assert!(matches!(err, ProductError::CacheUnavailable(_)));
    }

    #[test]
    fn test_decode_product_reports_key() {
        let err = decode_product("product9", b"[]").unwrap_err();
        match err {
            ProductError::CorruptCacheEntry { key, .. } => assert_eq!(key, "product9"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
