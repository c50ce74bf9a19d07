//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/products - full catalog, admin view
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.products().find_all()?;
    Ok(Json(products))
}

/// GET /api/menu - available products only
pub async fn menu(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.products().find_available()?;
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .products()
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    if data.price.is_sign_negative() {
        return Err(AppError::validation("Product price cannot be negative"));
    }
    let product = state.products().create(data)?;
    tracing::info!(id = %product.id, name = %product.name, "Product created");
    Ok(Json(product))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(price) = data.price {
        if price.is_sign_negative() {
            return Err(AppError::validation("Product price cannot be negative"));
        }
    }
    let product = state.products().update(&id, data)?;
    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    state.products().delete(&id)?;
    tracing::info!(%id, "Product deleted");
    Ok(Json(serde_json::json!({ "deleted": id })))
}
