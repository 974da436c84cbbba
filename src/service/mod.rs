//! Service Module
//!
//! Cache-aside reads and direct writes over injected store and cache
//! backends.

mod products;


pub use products::{ProductService, DEFAULT_OPERATION_TIMEOUT};
