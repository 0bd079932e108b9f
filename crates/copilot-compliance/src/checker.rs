//! # Compliance Checker
//!
//! Runs one compliance check end to end:
//!
//! 1. Validate the input.
//! 2. Select the policy and build the prompt and strict schema.
//! 3. Call the model once, bounded by the configured timeout.
//! 4. Extract the JSON payload from the first content block.
//! 5. Compare the payload against the schema (deviations are logged only).
//! 6. Normalize into a [`ComplianceCheckResult`].
//!
//! Each check runs inside a `compliance_check` span carrying a generated
//! `check_id`. The message text is never logged.

use std::sync::Arc;
use std::time::{Duration, Instant};

use copilot_core::policy::UNSPECIFIED;
use copilot_core::{ComplianceCheckInput, ComplianceCheckResult, RiskLevel};
use copilot_model_client::config::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use copilot_model_client::{ModelApiConfig, ResponsesAdapter};
use jsonschema::Validator;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::CheckError;
use crate::extract::extract_payload;
use crate::normalize::normalize;
use crate::prompt::{build_request, output_schema};

/// Tunables for the checker. Shared read-only across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerSettings {
    pub model: String,
    pub max_output_tokens: u32,
    /// Upper bound on the model call, enforced independently of the
    /// adapter's own transport timeout.
    pub timeout: Duration,
    /// Risk level used when the model omits `riskLevel` or sends an
    /// unknown value.
    pub risk_level_fallback: RiskLevel,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            risk_level_fallback: RiskLevel::Low,
        }
    }
}

impl CheckerSettings {
    /// Settings matching a provider configuration.
    pub fn from_model_config(config: &ModelApiConfig, risk_level_fallback: RiskLevel) -> Self {
        Self {
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
            risk_level_fallback,
        }
    }
}

/// Checks messages against industry policy using a model backend.
///
/// Cheap to clone; clones share the adapter and the compiled schema.
#[derive(Clone)]
pub struct ComplianceChecker {
    adapter: Arc<dyn ResponsesAdapter>,
    settings: CheckerSettings,
    validator: Option<Arc<Validator>>,
}

impl std::fmt::Debug for ComplianceChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceChecker")
            .field("adapter", &self.adapter.adapter_name())
            .field("settings", &self.settings)
            .field("schema_validation", &self.validator.is_some())
            .finish()
    }
}

impl ComplianceChecker {
    pub fn new(adapter: Arc<dyn ResponsesAdapter>, settings: CheckerSettings) -> Self {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = match opts.build(&output_schema()) {
            Ok(v) => Some(Arc::new(v)),
            Err(e) => {
                tracing::warn!(error = %e, "output schema failed to compile; conformance checks disabled");
                None
            }
        };

        Self {
            adapter,
            settings,
            validator,
        }
    }

    pub fn settings(&self) -> &CheckerSettings {
        &self.settings
    }

    /// Review `input` and return the normalized result.
    ///
    /// # Errors
    ///
    /// - [`CheckError::Validation`] if `input.text` is blank. The model is
    ///   not called.
    /// - [`CheckError::ExternalResponse`] on transport failure, non-2xx
    ///   status, timeout, refusal or an unusable content block.
    /// - [`CheckError::MalformedResponse`] if the model's text is not JSON.
    pub async fn check(
        &self,
        input: &ComplianceCheckInput,
    ) -> Result<ComplianceCheckResult, CheckError> {
        let span = tracing::info_span!(
            "compliance_check",
            check_id = %Uuid::new_v4(),
            industry = %input.industry,
            channel = input.channel.map(|c| c.as_str()).unwrap_or(UNSPECIFIED),
            adapter = self.adapter.adapter_name(),
        );

        let outcome = self.run(input).instrument(span).await;

        match &outcome {
            Ok(result) => {
                metrics::counter!(
                    "copilot_checks_total",
                    "outcome" => "ok",
                    "risk_level" => result.risk_level.as_str()
                )
                .increment(1);
            }
            Err(e) => {
                metrics::counter!(
                    "copilot_checks_total",
                    "outcome" => e.kind(),
                    "risk_level" => "none"
                )
                .increment(1);
            }
        }

        outcome
    }

    async fn run(&self, input: &ComplianceCheckInput) -> Result<ComplianceCheckResult, CheckError> {
        input.validate()?;

        let request = build_request(input, &self.settings.model, self.settings.max_output_tokens);

        let started = Instant::now();
        let call = tokio::time::timeout(
            self.settings.timeout,
            self.adapter.create_response(&request),
        )
        .await;
        metrics::histogram!("copilot_model_call_seconds").record(started.elapsed().as_secs_f64());

        let response = match call {
            Ok(response) => response?,
            Err(_) => {
                return Err(CheckError::external(format!(
                    "model call timed out after {}ms",
                    self.settings.timeout.as_millis()
                )))
            }
        };

        if let Some(usage) = &response.usage {
            metrics::counter!("copilot_model_tokens_total", "kind" => "input")
                .increment(usage.input_tokens);
            metrics::counter!("copilot_model_tokens_total", "kind" => "output")
                .increment(usage.output_tokens);
        }
        tracing::debug!(
            response_id = response.id.as_deref(),
            input_tokens = response.usage.as_ref().map(|u| u.input_tokens),
            output_tokens = response.usage.as_ref().map(|u| u.output_tokens),
            "model response received"
        );

        if response.is_incomplete() {
            tracing::warn!(
                reason = response
                    .incomplete_details
                    .as_ref()
                    .and_then(|d| d.reason.as_deref())
                    .unwrap_or("unknown"),
                "model response incomplete"
            );
        }

        let payload = extract_payload(&response)?;

        let deviations = self.schema_deviations(&payload);
        if !deviations.is_empty() {
            tracing::warn!(
                count = deviations.len(),
                deviations = %deviations.join("; "),
                "model output deviates from schema"
            );
        }

        let normalized = normalize(&payload, &input.text, self.settings.risk_level_fallback);
        if !normalized.is_clean() {
            let fields: Vec<String> = normalized.defaulted.iter().map(ToString::to_string).collect();
            tracing::warn!(defaulted = %fields.join(","), "model output normalized with defaults");
        }

        tracing::info!(
            risk_level = %normalized.result.risk_level,
            issues = normalized.result.issues.len(),
            disclosures = normalized.result.required_disclosures.len(),
            "compliance check complete"
        );

        Ok(normalized.result)
    }

    /// Ways in which `payload` departs from the declared output schema,
    /// one entry per violation as `"<path>: <message>"`.
    pub fn schema_deviations(&self, payload: &Value) -> Vec<String> {
        let Some(validator) = &self.validator else {
            return Vec::new();
        };
        validator
            .iter_errors(payload)
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copilot_core::{Channel, Industry};
    use copilot_model_client::{MockReply, MockResponsesAdapter, ModelResponse, Usage};
    use serde_json::json;

    fn checker_with(mock: &MockResponsesAdapter) -> ComplianceChecker {
        ComplianceChecker::new(Arc::new(mock.clone()), CheckerSettings::default())
    }

    fn input() -> ComplianceCheckInput {
        ComplianceCheckInput::new("This neighborhood is perfect for young families!", Industry::RealEstate)
            .unwrap()
            .with_jurisdiction("MD")
            .with_channel(Channel::Email)
    }

    fn complete_payload() -> Value {
        json!({
            "riskLevel": "high",
            "issues": [],
            "suggestedText": "X",
            "requiredDisclosures": [],
            "modelExplanation": "Y"
        })
    }

    #[tokio::test]
    async fn sends_one_request_with_policy_and_schema() {
        let mock = MockResponsesAdapter::responding_json(complete_payload());
        checker_with(&mock).check(&input()).await.unwrap();

        assert_eq!(mock.call_count(), 1);
        let request = &mock.requests()[0];
        assert_eq!(request.model, "gpt-4.1-mini");
        assert_eq!(request.max_output_tokens, 800);
        assert!(request.input.contains("REAL ESTATE"));
        assert!(request.input.contains("Jurisdiction: MD"));
        assert!(request.input.contains("Channel: email"));
    }

    #[tokio::test]
    async fn complete_payload_is_returned_verbatim() {
        let mock = MockResponsesAdapter::responding_json(complete_payload());
        let result = checker_with(&mock).check(&input()).await.unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), complete_payload());
    }

    #[tokio::test]
    async fn missing_issues_and_suggested_text_are_defaulted() {
        let mock = MockResponsesAdapter::responding(ModelResponse::output_text(r#"{"riskLevel":"medium"}"#));
        let input = input();
        let result = checker_with(&mock).check(&input).await.unwrap();

        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(result.issues.is_empty());
        assert_eq!(result.suggested_text, input.text);
        assert!(result.required_disclosures.is_empty());
        assert!(result.model_explanation.is_none());
    }

    #[tokio::test]
    async fn configured_fallback_applies_to_missing_risk_level() {
        let mock = MockResponsesAdapter::responding_json(json!({}));
        let settings = CheckerSettings {
            risk_level_fallback: RiskLevel::High,
            ..CheckerSettings::default()
        };
        let checker = ComplianceChecker::new(Arc::new(mock), settings);
        let result = checker.check(&input()).await.unwrap();
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[tokio::test]
    async fn refusal_is_external_response_with_reason() {
        let mock = MockResponsesAdapter::responding(ModelResponse::refusal("cannot assist"));
        let err = checker_with(&mock).check(&input()).await.unwrap_err();
        match err {
            CheckError::ExternalResponse { reason } => assert!(reason.contains("cannot assist")),
            other => panic!("expected ExternalResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_text_is_malformed() {
        let mock = MockResponsesAdapter::responding(ModelResponse::output_text("riskLevel: high"));
        let err = checker_with(&mock).check(&input()).await.unwrap_err();
        assert!(matches!(err, CheckError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_external_response() {
        let mock = MockResponsesAdapter::unavailable("connection refused");
        let err = checker_with(&mock).check(&input()).await.unwrap_err();
        assert!(matches!(err, CheckError::ExternalResponse { .. }));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn provider_status_is_external_response() {
        let mock = MockResponsesAdapter::new(MockReply::Status {
            status: 503,
            body: "overloaded".into(),
        });
        let err = checker_with(&mock).check(&input()).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_model_times_out() {
        let mock = MockResponsesAdapter::new(MockReply::Delayed {
            delay: Duration::from_secs(60),
            response: ModelResponse::output_json(complete_payload()),
        });
        let settings = CheckerSettings {
            timeout: Duration::from_secs(2),
            ..CheckerSettings::default()
        };
        let checker = ComplianceChecker::new(Arc::new(mock), settings);
        let err = checker.check(&input()).await.unwrap_err();
        match err {
            CheckError::ExternalResponse { reason } => assert!(reason.contains("timed out after 2000ms")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn token_usage_does_not_change_result() {
        let response = ModelResponse {
            id: Some("resp_123".into()),
            usage: Some(Usage {
                input_tokens: 410,
                output_tokens: 95,
                total_tokens: 505,
            }),
            ..ModelResponse::output_json(complete_payload())
        };
        let mock = MockResponsesAdapter::responding(response);
        let result = checker_with(&mock).check(&input()).await.unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), complete_payload());
    }

    #[tokio::test]
    async fn blank_text_never_reaches_model() {
        let mock = MockResponsesAdapter::responding_json(complete_payload());
        let mut input = input();
        input.text = "  \n".into();
        let err = checker_with(&mock).check(&input).await.unwrap_err();
        assert!(matches!(err, CheckError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn schema_deviations_reported_for_partial_payload() {
        let checker = checker_with(&MockResponsesAdapter::responding_json(json!({})));
        assert!(checker.schema_deviations(&complete_payload()).is_empty());

        let deviations = checker.schema_deviations(&json!({"riskLevel": "severe", "extra": 1}));
        assert!(!deviations.is_empty());
        assert!(deviations.iter().any(|d| d.contains("severe")));
    }

    #[test]
    fn settings_follow_model_config() {
        let mut config = ModelApiConfig::new("sk-test").unwrap();
        config.model = "gpt-4.1".into();
        config.timeout_secs = 12;
        config.max_output_tokens = 400;
        let settings = CheckerSettings::from_model_config(&config, RiskLevel::Medium);
        assert_eq!(settings.model, "gpt-4.1");
        assert_eq!(settings.timeout, Duration::from_secs(12));
        assert_eq!(settings.max_output_tokens, 400);
        assert_eq!(settings.risk_level_fallback, RiskLevel::Medium);
    }
}
