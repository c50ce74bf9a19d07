//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`products`] - catalog management and the public menu
//! - [`extras`] - add-on catalog management
//! - [`orders`] - checkout, lookup, status lifecycle
//! - [`payment`] - payment intent creation
//! - [`settings`] - store settings (logo)

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod extras;
pub mod health;
pub mod orders;
pub mod payment;
pub mod products;
pub mod settings;

pub mod router_ext;
pub use router_ext::{OneshotResult, OneshotRouter};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(products::router())
        .merge(extras::router())
        .merge(orders::router())
        .merge(payment::router())
        .merge(settings::router())
        .merge(health::router())
}

/// Build the fully configured application: routes, middleware, state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - the storefront is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // Trace - request spans at INFO level
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
