//! JSON error envelope for the HTTP API.

use crate::error::DomainSuggestError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

/// Error returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// The request body is not valid JSON of the expected shape.
    InvalidBody(String),
    /// The request was well-formed but failed validation.
    Validation(String),
    MethodNotAllowed,
    /// A collaborator or the pipeline itself failed.
    Pipeline(DomainSuggestError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "invalid_body"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed"),
            ApiError::Pipeline(DomainSuggestError::Validation { .. }) => {
                (StatusCode::BAD_REQUEST, "validation_error")
            }
            ApiError::Pipeline(DomainSuggestError::Timeout { .. }) => {
                (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout")
            }
            ApiError::Pipeline(e) if e.is_upstream() => (StatusCode::BAD_GATEWAY, "upstream_error"),
            ApiError::Pipeline(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::InvalidBody(message) | ApiError::Validation(message) => message.clone(),
            ApiError::MethodNotAllowed => "Invalid request! Use POST".to_string(),
            ApiError::Pipeline(DomainSuggestError::Validation { message }) => message.clone(),
            ApiError::Pipeline(e) if e.is_upstream() => {
                "An upstream service failed, please try again later".to_string()
            }
            ApiError::Pipeline(DomainSuggestError::Timeout { .. }) => {
                "Timed out while looking for available domains".to_string()
            }
            ApiError::Pipeline(_) => "Internal server error".to_string(),
        }
    }
}

impl From<DomainSuggestError> for ApiError {
    fn from(err: DomainSuggestError) -> Self {
        match err {
            DomainSuggestError::Validation { message } => ApiError::Validation(message),
            other => ApiError::Pipeline(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        if let ApiError::Pipeline(e) = &self {
            tracing::error!(error = %e, status = %status.as_u16(), "Request failed");
        }

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message: self.message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ApiError::InvalidBody("bad".into()), StatusCode::BAD_REQUEST),
            (ApiError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (
                ApiError::from(DomainSuggestError::timeout("pipeline", 60)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ApiError::from(DomainSuggestError::network("down", Some(503), None)),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::from(DomainSuggestError::authentication("bad key")),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::from(DomainSuggestError::internal("bug")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_validation_error_conversion() {
        let error = ApiError::from(DomainSuggestError::validation("Prompt too short"));
        assert!(matches!(error, ApiError::Validation(ref m) if m == "Prompt too short"));
    }

    #[test]
    fn test_upstream_details_not_leaked() {
        let error = ApiError::from(DomainSuggestError::llm_provider("openai", "sk-secret rejected", None));
        assert!(!error.message().contains("sk-secret"));
    }
}
