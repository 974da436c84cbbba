//! Domain records and HTTP DTOs for the product service
//!
//! `product` holds the entity itself; `requests` and `responses` define the
//! shapes decoded from and written to HTTP bodies.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{NewProduct, Product};
pub use requests::{AddProductForm, FieldPairs, GetProductQuery};
pub use responses::{ErrorResponse, HealthResponse, ProductCreatedResponse};
