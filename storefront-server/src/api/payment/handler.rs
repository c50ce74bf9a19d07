//! Payment API Handlers
//!
//! The amount charged is never taken from the client. The requested
//! lines are re-priced against the catalog here, and only the
//! resulting total is sent to the processor, in minor units.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::ServerState;
use crate::pricing;
use crate::utils::{AppError, AppResult};

/// Intent creation payload: the lines about to be paid for
#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    pub items: Vec<pricing::ItemRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    pub client_secret: String,
}

/// POST /api/payment/intent
pub async fn create_intent(
    State(state): State<ServerState>,
    Json(req): Json<IntentRequest>,
) -> AppResult<Json<IntentResponse>> {
    if req.items.is_empty() {
        return Err(AppError::validation("No items provided"));
    }

    let products: HashMap<_, _> = state
        .products()
        .find_all()?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();
    let extras: HashMap<_, _> = state
        .extras()
        .find_all()?
        .into_iter()
        .map(|e| (e.name.clone(), e))
        .collect();

    // An unknown product rejects the request before the processor
    // is ever contacted
    let quote = pricing::quote_order(&products, &extras, &req.items)?;
    let amount = pricing::to_minor_units(quote.total);

    let intent = state
        .processor
        .create_intent(amount, &state.config.currency)
        .await?;

    Ok(Json(IntentResponse {
        client_secret: intent.client_secret,
    }))
}
