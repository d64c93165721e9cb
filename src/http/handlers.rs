//! HTTP handlers.

use crate::http::dto::{HealthResponse, SuggestRequest, SuggestResponse};
use crate::http::{ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

/// Suggests available domain names for a short description.
///
/// # Endpoint
///
/// `POST /domains`
///
/// # Request Body
///
/// ```json
/// { "prompt": "an online store for handmade candles", "tlds": [".com", ".io"] }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "domains": [
///     {
///       "siteName": "novahive",
///       "tlds": [".com", ".io"],
///       "link": "https://www.namecheap.com/domains/registration/results/?domain=novahive"
///     }
///   ]
/// }
/// ```
///
/// An empty `domains` list is a successful answer.
///
/// # Errors
///
/// - 400 for an unreadable body or a prompt/TLD list that fails validation
/// - 502 when the text-generation provider fails
/// - 504 when the request deadline is exceeded
pub async fn suggest_handler(
    State(state): State<AppState>,
    payload: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let Json(payload) = payload?;

    state.validator.validate_prompt(&payload.prompt)?;
    state.validator.validate_tlds(&payload.tlds)?;

    tracing::debug!(prompt = %payload.prompt, tlds = ?payload.tlds, "Suggest request accepted");

    let domains = state.pipeline.run(&payload.prompt, &payload.tlds).await?;

    Ok(Json(SuggestResponse { domains }))
}

/// Liveness probe with a metrics snapshot.
///
/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
        metrics: state.metrics.get_stats(),
    })
}

/// Any method other than POST on `/domains`.
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
