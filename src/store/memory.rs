//! In-memory product store

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ProductStore;
use crate::error::{ProductError, Result};
use crate::models::{NewProduct, Product};

/// Process-local store with sequential identifiers starting at 1.
#[derive(Debug)]
pub struct MemoryProductStore {
    rows: RwLock<HashMap<i64, Product>>,
    next_id: AtomicI64,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, product: NewProduct) -> Result<i64> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.rows.write().await.insert(id, product.with_id(id));
        Ok(id)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Product> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ProductError::NotFound(id))
    }
}
