//! Settings API Handlers
//!
//! Store branding lives in the `settings` collection as single
//! string values keyed by name.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::store::SETTINGS;
use crate::utils::{AppError, AppResult};

const LOGO_KEY: &str = "logo";

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoSetting {
    /// Image reference (URL or data URI)
    pub logo: String,
}

/// GET /api/settings/logo
pub async fn get_logo(State(state): State<ServerState>) -> AppResult<Json<LogoSetting>> {
    let logo: String = state
        .store
        .get(SETTINGS, LOGO_KEY)?
        .ok_or_else(|| AppError::not_found("Logo"))?;
    Ok(Json(LogoSetting { logo }))
}

/// PUT /api/settings/logo
pub async fn set_logo(
    State(state): State<ServerState>,
    Json(setting): Json<LogoSetting>,
) -> AppResult<Json<LogoSetting>> {
    if setting.logo.trim().is_empty() {
        return Err(AppError::validation("Logo cannot be empty"));
    }
    state.store.put(SETTINGS, LOGO_KEY, &setting.logo)?;
    Ok(Json(setting))
}

/// DELETE /api/settings/logo
pub async fn delete_logo(State(state): State<ServerState>) -> AppResult<Json<serde_json::Value>> {
    state.store.delete(SETTINGS, LOGO_KEY)?;
    Ok(Json(serde_json::json!({ "deleted": LOGO_KEY })))
}
