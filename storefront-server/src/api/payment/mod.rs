//! Payment API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::{IntentRequest, IntentResponse};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/payment/intent", post(handler::create_intent))
}
