//! Route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use pipeline::Relay;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Creates the router with all routes configured.
pub fn create_router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route(
            "/dispatch",
            post(handlers::dispatch).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}
