//! Store Module
//!
//! Durable persistence for product records. The service only sees the
//! [`ProductStore`] trait; `postgres` is the production backend and `memory`
//! backs local runs and tests.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewProduct, Product};

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

/// Create and fetch-by-id access to product records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a product and returns the identifier the store assigned.
    async fn create(&self, product: NewProduct) -> Result<i64>;

    /// Loads one product, failing with `NotFound` when no row matches.
    async fn fetch_by_id(&self, id: i64) -> Result<Product>;
}
