//! Request and response bodies of the HTTP API.

use crate::types::{MetricsSnapshot, Recommendation};
use serde::{Deserialize, Serialize};

/// `POST /domains` request body
///
/// Both fields default to empty so that missing fields are reported as
/// validation errors rather than body rejections.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub tlds: Vec<String>,
}

/// `POST /domains` response body
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub domains: Vec<Recommendation>,
}

/// `GET /health` response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub metrics: MetricsSnapshot,
}
