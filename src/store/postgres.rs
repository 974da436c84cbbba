//! PostgreSQL product store

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use super::ProductStore;
use crate::error::{ProductError, Result};
use crate::models::{NewProduct, Product};

const INSERT_PRODUCT: &str =
    "INSERT INTO products (name, price, category) VALUES ($1, $2, $3) RETURNING id";

const SELECT_PRODUCT_BY_ID: &str =
    "SELECT id, name, price, category FROM products WHERE id = $1";

/// Product store backed by a `products` table.
///
/// The table is expected to exist already; see `sql/products.sql`.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool. Fails if the database cannot be reached.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, product: NewProduct) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(INSERT_PRODUCT)
            .bind(&product.name)
            .bind(&product.price)
            .bind(&product.category)
            .fetch_one(&self.pool)
            .await?;

        debug!(id, "product inserted");
        Ok(id)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Product> {
        sqlx::query_as::<_, Product>(SELECT_PRODUCT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}
