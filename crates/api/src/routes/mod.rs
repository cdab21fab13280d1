//! API route definitions.

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;

use salesdesk_shared::AppError;

use crate::AppState;

pub mod health;
pub mod totals;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::routes()).merge(totals::routes())
}

/// Renders an application error as a JSON response.
pub fn error_response(error: &AppError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": error.error_code(),
            "message": error.to_string(),
        })),
    )
        .into_response()
}

/// Maps a rejected JSON body to a validation error response.
pub fn rejection_response(rejection: &JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "Rejected request body");
    error_response(&AppError::Validation(rejection.body_text()))
}

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    error_response(&AppError::NotFound("route".to_string()))
}
