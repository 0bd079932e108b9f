//! # Request Extraction & Validation
//!
//! Handlers take `Result<Json<T>, JsonRejection>` so that body rejections
//! reach [`AppError`] instead of axum's plain-text default. Required-field
//! checks then run through [`Validate`], which reports the domain's own
//! [`ValidationError`].

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use copilot_core::ValidationError;

use crate::error::AppError;

/// Request DTOs whose required fields serde cannot enforce on its own.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Unwrap a JSON body.
///
/// An oversized body becomes [`AppError::PayloadTooLarge`]. Every other
/// rejection (bad syntax, wrong content type, wrong field types) becomes
/// [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match result {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::PayloadTooLarge)
        }
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

/// Unwrap a JSON body and check its required fields.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(Option<String>);

    impl Validate for Named {
        fn validate(&self) -> Result<(), ValidationError> {
            match self.0 {
                Some(_) => Ok(()),
                None => Err(ValidationError::MissingField { field: "name" }),
            }
        }
    }

    #[test]
    fn validation_failure_keeps_the_field() {
        let err = extract_validated_json(Ok(Json(Named(None)))).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingField { field: "name" })
        ));
    }

    #[test]
    fn valid_body_passes_through() {
        let value = extract_validated_json(Ok(Json(Named(Some("x".into()))))).unwrap();
        assert_eq!(value.0.as_deref(), Some("x"));
    }
}
