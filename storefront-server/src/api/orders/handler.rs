//! Order API Handlers
//!
//! Checkout is the one write path that touches everything: the
//! request lines are priced against the current catalog, consolidated
//! through a scratch cart, stamped with a pickup code and frozen as
//! an immutable snapshot. After that only `status` ever changes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::models::{CartItem, Order, OrderStatus, PaymentMethod};
use shared::order_code::{generate_order_code, is_valid_order_code};
use shared::pickup::is_valid_pickup_time;
use uuid::Uuid;
use validator::Validate;

use crate::cart::{Cart, MemoryCartStore};
use crate::core::ServerState;
use crate::pricing;
use crate::utils::{AppError, AppResult};

/// Checkout payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 7, message = "Phone number looks too short"))]
    pub customer_phone: String,
    pub pickup_time: String,
    pub payment_method: PaymentMethod,
    #[validate(length(min = 1, message = "No items provided"))]
    pub items: Vec<pricing::ItemRequest>,
}

/// Batch code lookup payload
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub codes: Vec<String>,
}

/// Status transition payload
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// POST /api/orders - checkout
pub async fn checkout(
    State(state): State<ServerState>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<Order>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    if !is_valid_pickup_time(&req.pickup_time) {
        return Err(AppError::validation(format!(
            "Invalid pickup time: {}",
            req.pickup_time
        )));
    }

    // One catalog snapshot for the whole order
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

    let quote = pricing::quote_order(&products, &extras, &req.items)?;

    // Consolidate duplicate (product, extras) lines through a scratch cart
    let mut cart = Cart::open(Arc::new(MemoryCartStore::new()));
    for line in &quote.items {
        let image = products
            .get(&line.product_id)
            .map(|p| p.image.clone())
            .unwrap_or_default();
        cart.add(CartItem {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            price: line.unit_price,
            image,
            quantity: line.quantity,
            notes: line.notes.clone(),
            extras: line.extras.clone(),
        });
    }

    let order = Order {
        id: Uuid::new_v4().to_string(),
        code: fresh_code(&state)?,
        customer_name: req.customer_name,
        customer_phone: req.customer_phone,
        pickup_time: req.pickup_time,
        payment_method: req.payment_method,
        items: cart.items().to_vec(),
        total: cart.subtotal(),
        status: OrderStatus::Received,
        created_at: Utc::now().to_rfc3339(),
    };
    let order = state.orders().create(order)?;
    tracing::info!(
        code = %order.code,
        total = %order.total,
        lines = order.items.len(),
        "Order created"
    );
    Ok(Json(order))
}

/// Generate a pickup code not already in use
fn fresh_code(state: &ServerState) -> AppResult<String> {
    let orders = state.orders();
    for _ in 0..10 {
        let code = generate_order_code();
        if orders.find_by_code(&code)?.is_none() {
            return Ok(code);
        }
    }
    Err(AppError::Internal(
        "Could not allocate an unused pickup code".into(),
    ))
}

/// GET /api/orders - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders().find_all()?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders()
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(Json(order))
}

/// GET /api/orders/by-code/:code
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Order>> {
    if !is_valid_order_code(&code) {
        return Err(AppError::validation(format!("Malformed pickup code: {code}")));
    }
    let order = state
        .orders()
        .find_by_code(&code)?
        .ok_or_else(|| AppError::not_found(format!("Order {code}")))?;
    Ok(Json(order))
}

/// Long-poll tracking result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub code: String,
    pub status: OrderStatus,
    /// Whether a change was observed during this poll window
    pub changed: bool,
}

/// How long one tracking request stays open waiting for a change
const TRACK_WINDOW: Duration = Duration::from_secs(25);

/// GET /api/orders/by-code/:code/track - long-poll for the next
/// status change
///
/// Holds the request open until the order's status changes or the
/// window elapses, whichever comes first. The per-request watcher is
/// cancelled when its handle drops at the end of the request, so an
/// abandoned client costs nothing past the window.
pub async fn track(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<TrackResponse>> {
    if !is_valid_order_code(&code) {
        return Err(AppError::validation(format!("Malformed pickup code: {code}")));
    }
    let order = state
        .orders()
        .find_by_code(&code)?
        .ok_or_else(|| AppError::not_found(format!("Order {code}")))?;

    // Terminal orders can never change again
    if order.status.is_terminal() {
        return Ok(Json(TrackResponse {
            code,
            status: order.status,
            changed: false,
        }));
    }

    let mut events = state.watcher.subscribe();
    let _handle = state.watcher.watch(code.clone());

    let observed = tokio::time::timeout(TRACK_WINDOW, async {
        loop {
            match events.recv().await {
                Ok(change) if change.code == code => break Some(change),
                Ok(_) => continue,
                Err(_) => break None,
            }
        }
    })
    .await;

    match observed {
        Ok(Some(change)) => Ok(Json(TrackResponse {
            code,
            status: change.to,
            changed: true,
        })),
        _ => {
            // Window elapsed without a change; report the current state
            let status = state
                .orders()
                .find_by_code(&code)?
                .map(|o| o.status)
                .unwrap_or(order.status);
            Ok(Json(TrackResponse {
                code,
                status,
                changed: false,
            }))
        }
    }
}

/// POST /api/orders/lookup - batch by code, unknown codes skipped
pub async fn lookup(
    State(state): State<ServerState>,
    Json(req): Json<LookupRequest>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders().find_by_codes(&req.codes)?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/status - enforced by the lifecycle state machine
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> AppResult<Json<Order>> {
    let order = state.orders().update_status(&id, req.status)?;
    Ok(Json(order))
}
