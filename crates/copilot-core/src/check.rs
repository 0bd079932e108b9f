//! # Compliance Check Types
//!
//! The input a caller submits and the result the copilot returns. Both are
//! created fresh per request and never persisted. JSON field names are
//! camelCase to match the frontend contract.

use serde::{Deserialize, Serialize};

use crate::domain::{Channel, Industry, RiskLevel};
use crate::error::ValidationError;

/// A message to review, with the context that selects the policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCheckInput {
    /// The agent's message, verbatim.
    pub text: String,
    pub industry: Industry,
    /// Free-text region code, e.g. "MD".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    /// Opaque caller identifier. Not used by the check itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Opaque caller identifier. Not used by the check itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}

impl ComplianceCheckInput {
    /// Build an input, rejecting empty or whitespace-only text.
    pub fn new(text: impl Into<String>, industry: Industry) -> Result<Self, ValidationError> {
        let input = Self {
            text: text.into(),
            industry,
            jurisdiction: None,
            channel: None,
            agent_id: None,
            org_id: None,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn with_jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Check the invariant that `text` is non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "text" });
        }
        Ok(())
    }
}

/// One flagged compliance problem within a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ComplianceIssue {
    /// Short machine-readable tag, e.g. `FAIR_HOUSING_STEERING`.
    pub code: String,
    pub description: String,
    pub severity: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Grouping such as `fair_housing`, `advertising` or `privacy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// The outcome of reviewing one message.
///
/// `issues` and `required_disclosures` keep the order the model produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCheckResult {
    pub risk_level: RiskLevel,
    pub issues: Vec<ComplianceIssue>,
    /// Safer rewrite of the message. Equals the input text when the model
    /// offered none.
    pub suggested_text: String,
    pub required_disclosures: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_explanation: Option<String>,
}
