//! # Compliance Routes
//!
//! `POST /api/compliance/check-message` reviews one agent message against
//! the policy for its industry. Handlers only translate HTTP to
//! [`ComplianceCheckInput`] and back; the work happens in
//! [`copilot_compliance::ComplianceChecker`].

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use copilot_core::{
    Channel, ComplianceCheckInput, ComplianceCheckResult, Industry, ValidationError,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Request body for a message check.
///
/// `text` and `industry` are required. They are optional here so that a
/// missing field yields the fixed 400 body rather than a serde rejection.
/// `industry` stays a raw string until validation has ruled out a blank
/// value; anything unrecognized then selects the generic policy.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckMessageRequest {
    pub text: Option<String>,
    #[schema(example = "real_estate")]
    pub industry: Option<String>,
    pub jurisdiction: Option<String>,
    pub channel: Option<Channel>,
    pub agent_id: Option<String>,
    pub org_id: Option<String>,
}

impl Validate for CheckMessageRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        required("text", self.text.as_deref())?;
        required("industry", self.industry.as_deref())?;
        Ok(())
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        None => Err(ValidationError::MissingField { field }),
        Some(v) if v.trim().is_empty() => Err(ValidationError::EmptyField { field }),
        Some(_) => Ok(()),
    }
}

impl CheckMessageRequest {
    /// Convert a validated request into checker input.
    fn into_input(self) -> Result<ComplianceCheckInput, AppError> {
        let text = self.text.ok_or(ValidationError::MissingField { field: "text" })?;
        let industry = self
            .industry
            .as_deref()
            .map(|raw| Industry::from_wire(raw.trim()))
            .ok_or(ValidationError::MissingField { field: "industry" })?;
        let mut input = ComplianceCheckInput::new(text, industry)?;
        input.jurisdiction = self.jurisdiction;
        input.channel = self.channel;
        input.agent_id = self.agent_id;
        input.org_id = self.org_id;
        Ok(input)
    }
}

/// Build the compliance router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/compliance/check-message", post(check_message))
}

/// POST /api/compliance/check-message — Review a message for compliance.
#[utoipa::path(
    post,
    path = "/api/compliance/check-message",
    request_body = CheckMessageRequest,
    responses(
        (status = 200, description = "Check completed", body = ComplianceCheckResult),
        (status = 400, description = "text or industry missing", body = ErrorBody),
        (status = 413, description = "Request body too large", body = ErrorBody),
        (status = 500, description = "Model call or response handling failed", body = ErrorBody),
    ),
    tag = "compliance"
)]
pub async fn check_message(
    State(state): State<AppState>,
    body: Result<Json<CheckMessageRequest>, JsonRejection>,
) -> Result<Json<ComplianceCheckResult>, AppError> {
    let req = extract_validated_json(body)?;
    let input = req.into_input()?;

    tracing::info!(
        industry = %input.industry,
        jurisdiction = input.jurisdiction.as_deref(),
        agent_id = input.agent_id.as_deref(),
        org_id = input.org_id.as_deref(),
        "compliance check requested"
    );

    let result = state.checker.check(&input).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: Option<&str>, industry: Option<&str>) -> CheckMessageRequest {
        CheckMessageRequest {
            text: text.map(str::to_string),
            industry: industry.map(str::to_string),
            jurisdiction: Some("MD".into()),
            channel: Some(Channel::Sms),
            agent_id: Some("agent-7".into()),
            org_id: None,
        }
    }

    #[test]
    fn validate_requires_text_and_industry() {
        assert_eq!(
            request(None, Some("finance")).validate(),
            Err(ValidationError::MissingField { field: "text" })
        );
        assert_eq!(
            request(Some("   "), Some("finance")).validate(),
            Err(ValidationError::EmptyField { field: "text" })
        );
        assert_eq!(
            request(Some("hello"), None).validate(),
            Err(ValidationError::MissingField { field: "industry" })
        );
        assert!(request(Some(""), Some("finance")).validate().is_err());
        assert!(request(Some("hello"), Some("finance")).validate().is_ok());
    }

    #[test]
    fn blank_industry_counts_as_missing() {
        for blank in ["", "   ", "\t"] {
            assert_eq!(
                request(Some("hello"), Some(blank)).validate(),
                Err(ValidationError::EmptyField { field: "industry" })
            );
        }
    }

    #[test]
    fn into_input_carries_optional_context() {
        let input = request(Some("hello"), Some("real_estate")).into_input().unwrap();
        assert_eq!(input.text, "hello");
        assert_eq!(input.industry, Industry::RealEstate);
        assert_eq!(input.jurisdiction.as_deref(), Some("MD"));
        assert_eq!(input.channel, Some(Channel::Sms));
        assert_eq!(input.agent_id.as_deref(), Some("agent-7"));
        assert!(input.org_id.is_none());
    }

    #[test]
    fn camel_case_body_deserializes() {
        let req: CheckMessageRequest = serde_json::from_str(
            r#"{"text":"hi","industry":"finance","channel":"phone_script","agentId":"a1","orgId":"o1"}"#,
        )
        .unwrap();
        assert_eq!(req.industry.as_deref(), Some("finance"));
        assert_eq!(req.channel, Some(Channel::PhoneScript));
        assert_eq!(req.agent_id.as_deref(), Some("a1"));
        assert_eq!(req.org_id.as_deref(), Some("o1"));
    }

    #[test]
    fn unknown_industry_is_generic() {
        let req: CheckMessageRequest =
            serde_json::from_str(r#"{"text":"hi","industry":"insurance"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.into_input().unwrap().industry, Industry::Generic);
    }
}
