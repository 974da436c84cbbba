//! Product Cache - a product catalogue service with a read-through cache
//!
//! Products are stored in PostgreSQL and read through a Redis cache with a
//! fixed TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::ProductError;
pub use service::ProductService;
pub use tasks::spawn_cleanup_task;
