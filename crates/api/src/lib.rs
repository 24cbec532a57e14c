//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Fund-transfer and status-query routes
//! - The `{success, message, data?, errors?}` response envelope
//! - JSON 404/405 fallbacks
//! - Security headers

pub mod middleware;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use remit_core::TransferService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Transfer orchestrator.
    pub transfers: Arc<TransferService>,
}

impl AppState {
    /// Wraps a transfer service.
    #[must_use]
    pub fn new(transfers: TransferService) -> Self {
        Self {
            transfers: Arc::new(transfers),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(routes::fallback::not_found)
        .method_not_allowed_fallback(routes::fallback::method_not_allowed)
        .layer(axum::middleware::from_fn(middleware::security::security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
