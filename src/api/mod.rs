//! API Module
//!
//! HTTP handlers and routing for the product service.
//!
//! # Endpoints
//! - `POST /product-add` - Create a product from form fields
//! - `GET /product?id=<id>` - Read a product by id
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
