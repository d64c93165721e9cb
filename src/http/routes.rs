//! Route configuration.

use crate::http::handlers::{health_handler, method_not_allowed_handler, suggest_handler};
use crate::http::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Application router.
///
/// # Endpoints
///
/// - `POST /domains` - suggest available domain names
/// - `GET  /health`  - liveness and metrics
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/domains",
            post(suggest_handler).fallback(method_not_allowed_handler),
        )
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
