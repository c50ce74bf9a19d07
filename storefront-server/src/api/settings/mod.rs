//! Settings API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/settings/logo",
        get(handler::get_logo)
            .put(handler::set_logo)
            .delete(handler::delete_logo),
    )
}
