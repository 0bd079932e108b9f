//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure collapses to a fixed JSON body; the underlying detail is
//! logged, never returned to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use copilot_compliance::CheckError;
use copilot_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body returned for any request missing `text` or `industry`.
pub const REQUIRED_FIELDS_MESSAGE: &str = "text and industry are required fields";

/// Body returned for any checker failure.
pub const CHECK_FAILED_MESSAGE: &str = "Failed to run compliance check";

/// Body returned when the request exceeds the body limit.
pub const BODY_TOO_LARGE_MESSAGE: &str = "request body too large";

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request body is unparseable (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A required field is missing or blank (400).
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The request body exceeds the configured limit (413).
    #[error("request body exceeds limit")]
    PayloadTooLarge,

    /// The compliance check itself failed (500, or 400 for invalid input).
    #[error("compliance check failed: {0}")]
    Check(#[from] CheckError),
}

impl AppError {
    /// Return the HTTP status code and client-facing message for this error.
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) | Self::Validation(_) | Self::Check(CheckError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, REQUIRED_FIELDS_MESSAGE)
            }
            Self::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE_MESSAGE),
            Self::Check(_) => (StatusCode::INTERNAL_SERVER_ERROR, CHECK_FAILED_MESSAGE),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            let kind = match &self {
                Self::Check(e) => e.kind(),
                _ => "request",
            };
            tracing::error!(error = %self, kind, "compliance check failed");
        } else {
            tracing::debug!(error = %self, "rejected request");
        }

        let body = ErrorBody {
            error: message.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400_with_fixed_message() {
        let (status, message) = AppError::BadRequest("missing field `text`".into()).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn missing_field_maps_to_400_with_fixed_message() {
        let err = AppError::from(ValidationError::MissingField { field: "industry" });
        assert_eq!(
            err.status_and_message(),
            (StatusCode::BAD_REQUEST, REQUIRED_FIELDS_MESSAGE)
        );
    }

    #[test]
    fn oversized_body_maps_to_413() {
        assert_eq!(
            AppError::PayloadTooLarge.status_and_message(),
            (StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE_MESSAGE)
        );
    }

    #[test]
    fn check_validation_maps_to_400() {
        let err = AppError::from(CheckError::Validation(ValidationError::EmptyField { field: "text" }));
        assert_eq!(err.status_and_message().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn check_failures_map_to_500_generic_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(CheckError::MalformedResponse { source: parse_err });
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, CHECK_FAILED_MESSAGE);
    }

    #[test]
    fn response_body_hides_detail() {
        let err = AppError::from(CheckError::ExternalResponse {
            reason: "sk-secret leaked in upstream error".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
