//! Request DTOs for the product service API
//!
//! Fields arrive as ordered `(name, value)` pairs decoded from the form body
//! and the query string. A repeated field resolves to its first value.

use crate::error::{ProductError, Result};
use crate::models::NewProduct;

/// Decoded `application/x-www-form-urlencoded` fields, in request order.
pub type FieldPairs = Vec<(String, String)>;

fn first_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Fields of `POST /product-add`.
///
/// Absent fields are empty strings; presence is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddProductForm {
    pub name: String,
    pub price: String,
    pub category: String,
}

impl AddProductForm {
    /// Resolves each field from the body first, then the query string.
    pub fn from_pairs(body: &[(String, String)], query: &[(String, String)]) -> Self {
        let field = |name: &str| {
            first_value(body, name)
                .or_else(|| first_value(query, name))
                .unwrap_or_default()
                .to_string()
        };

        Self {
            name: field("name"),
            price: field("price"),
            category: field("category"),
        }
    }
}

impl From<AddProductForm> for NewProduct {
    fn from(form: AddProductForm) -> Self {
        NewProduct::new(form.name, form.price, form.category)
    }
}

/// Query string for `GET /product`.
#[derive(Debug, Clone, Default)]
pub struct GetProductQuery {
    pub id: Option<String>,
}

impl GetProductQuery {
    pub fn from_pairs(query: &[(String, String)]) -> Self {
        Self {
            id: first_value(query, "id").map(str::to_string),
        }
    }

    /// Parses the raw `id` field into a product identifier.
    ///
    /// Anything that is not a plain base-10 integer is rejected before it can
    /// reach a query.
    pub fn product_id(&self) -> Result<i64> {
        let raw = self
            .id
            .as_deref()
            .ok_or_else(|| ProductError::MalformedRequest("missing field `id`".to_string()))?;

        raw.parse::<i64>().map_err(|_| {
            ProductError::MalformedRequest(format!("`id` must be an integer, got {:?}", raw))
        })
    }
}
