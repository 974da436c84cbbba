//! API Handlers
//!
//! HTTP request handlers for each product service endpoint. Every handler
//! returns either a JSON body or a [`ProductError`], which renders its own
//! status and body.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Query, State},
    http::{Method, StatusCode},
    Form, Json,
};

use crate::cache::MemoryCache;
use crate::error::{ProductError, Result};
use crate::models::{
    AddProductForm, FieldPairs, GetProductQuery, HealthResponse, Product,
    ProductCreatedResponse,
};
use crate::service::ProductService;
use crate::store::MemoryProductStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: ProductService,
}

impl AppState {
    /// Creates a new AppState around a configured service.
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }

    /// State backed by a fresh in-memory store and the given in-memory cache.
    pub fn in_memory(cache: Arc<MemoryCache>) -> Self {
        Self::new(ProductService::new(
            Arc::new(MemoryProductStore::new()),
            cache,
        ))
    }
}

/// Handler for POST /product-add
///
/// Reads `name`, `price` and `category` from the form body, falling back to
/// query string fields of the same name, and stores them.
pub async fn add_product_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<FieldPairs>, QueryRejection>,
    body: std::result::Result<Form<FieldPairs>, FormRejection>,
) -> Result<(StatusCode, Json<ProductCreatedResponse>)> {
    let Query(query) =
        query.map_err(|rejection| ProductError::MalformedRequest(rejection.body_text()))?;
    let Form(body) =
        body.map_err(|rejection| ProductError::MalformedRequest(rejection.body_text()))?;
    let form = AddProductForm::from_pairs(&body, &query);

    let id = state.service.add_product(form.into()).await?;

    Ok((StatusCode::CREATED, Json(ProductCreatedResponse::new(id))))
}

/// Handler for GET /product
///
/// Reads the first `id` query field and returns the matching product.
pub async fn get_product_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<FieldPairs>, QueryRejection>,
) -> Result<Json<Product>> {
    let Query(pairs) =
        query.map_err(|rejection| ProductError::MalformedRequest(rejection.body_text()))?;
    let id = GetProductQuery::from_pairs(&pairs).product_id()?;

    let product = state.service.get_product(id).await?;

    Ok(Json(product))
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed_handler(method: Method) -> ProductError {
    ProductError::MethodNotAllowed(method.to_string())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
