//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes exposing the totals engine
//! - JSON error responses
//! - Response types

pub mod routes;

use axum::Router;
use salesdesk_core::currency::CurrencyFormatter;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Formatter for display strings.
    pub formatter: Arc<CurrencyFormatter>,
}

impl AppState {
    /// Creates state around the given formatter.
    #[must_use]
    pub fn new(formatter: CurrencyFormatter) -> Self {
        Self {
            formatter: Arc::new(formatter),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
