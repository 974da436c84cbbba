//! Product entity

use serde::{Deserialize, Serialize};

/// A persisted product record.
///
/// `id` is assigned by the store on creation and never changes. `price` is
/// kept as text exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub category: String,
}

/// The fields of a product that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: String,
    pub category: String,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            category: category.into(),
        }
    }

    /// Attaches a store-assigned identifier.
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            category: self.category,
        }
    }
}
