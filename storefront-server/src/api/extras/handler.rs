//! Extra API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Extra, ExtraCreate, ExtraUpdate};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/extras
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Extra>>> {
    let extras = state.extras().find_all()?;
    Ok(Json(extras))
}

/// GET /api/extras/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Extra>> {
    let extra = state
        .extras()
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found(format!("Extra {id}")))?;
    Ok(Json(extra))
}

/// POST /api/extras
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<ExtraCreate>,
) -> AppResult<Json<Extra>> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Extra name is required"));
    }
    if data.price.is_sign_negative() {
        return Err(AppError::validation("Extra price cannot be negative"));
    }
    let extra = state.extras().create(data)?;
    tracing::info!(id = %extra.id, name = %extra.name, "Extra created");
    Ok(Json(extra))
}

/// PUT /api/extras/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<ExtraUpdate>,
) -> AppResult<Json<Extra>> {
    if let Some(price) = data.price {
        if price.is_sign_negative() {
            return Err(AppError::validation("Extra price cannot be negative"));
        }
    }
    let extra = state.extras().update(&id, data)?;
    Ok(Json(extra))
}

/// DELETE /api/extras/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    state.extras().delete(&id)?;
    tracing::info!(%id, "Extra deleted");
    Ok(Json(serde_json::json!({ "deleted": id })))
}
