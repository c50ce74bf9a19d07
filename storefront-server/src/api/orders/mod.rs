//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub use handler::{CheckoutRequest, LookupRequest, StatusUpdateRequest, TrackResponse};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::checkout))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .route("/by-code/{code}", get(handler::get_by_code))
        .route("/by-code/{code}/track", get(handler::track))
        .route("/lookup", post(handler::lookup))
}
