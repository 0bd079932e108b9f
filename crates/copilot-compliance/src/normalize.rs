//! # Result Normalization
//!
//! Converts the model's parsed JSON into a [`ComplianceCheckResult`],
//! substituting defaults for anything missing or of the wrong shape.
//!
//! | Field | Missing or invalid |
//! |-------|--------------------|
//! | `riskLevel` | configured fallback (default `low`) |
//! | `issues` | `[]`; malformed elements dropped |
//! | `suggestedText` | the original message text |
//! | `requiredDisclosures` | `[]`; non-string elements dropped |
//! | `modelExplanation` | absent |
//!
//! Normalization never fails. Every substitution is recorded in
//! [`Normalized::defaulted`] so callers can log it.

use std::fmt;

use copilot_core::{ComplianceCheckResult, ComplianceIssue, RiskLevel};
use serde_json::{Map, Value};

/// A field that normalization had to default or prune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Defaulted {
    RiskLevel,
    Issues,
    /// Issue at this index was not a well-formed issue object.
    DroppedIssue(usize),
    SuggestedText,
    RequiredDisclosures,
    /// Disclosure at this index was not a string.
    DroppedDisclosure(usize),
}

impl fmt::Display for Defaulted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RiskLevel => f.write_str("riskLevel"),
            Self::Issues => f.write_str("issues"),
            Self::DroppedIssue(i) => write!(f, "issues[{i}]"),
            Self::SuggestedText => f.write_str("suggestedText"),
            Self::RequiredDisclosures => f.write_str("requiredDisclosures"),
            Self::DroppedDisclosure(i) => write!(f, "requiredDisclosures[{i}]"),
        }
    }
}

/// A normalized result plus the report of applied defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub result: ComplianceCheckResult,
    pub defaulted: Vec<Defaulted>,
}

impl Normalized {
    /// True when the payload needed no substitutions.
    pub fn is_clean(&self) -> bool {
        self.defaulted.is_empty()
    }
}

/// Normalize `payload` for a check of `original_text`.
///
/// A payload that is not a JSON object is treated as an empty object.
pub fn normalize(payload: &Value, original_text: &str, risk_fallback: RiskLevel) -> Normalized {
    let empty = Map::new();
    let obj = payload.as_object().unwrap_or(&empty);
    let mut defaulted = Vec::new();

    let risk_level = match obj
        .get("riskLevel")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<RiskLevel>().ok())
    {
        Some(level) => level,
        None => {
            defaulted.push(Defaulted::RiskLevel);
            risk_fallback
        }
    };

    let issues = match obj.get("issues") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                match serde_json::from_value::<ComplianceIssue>(item.clone()) {
                    Ok(issue) => Some(issue),
                    Err(_) => {
                        defaulted.push(Defaulted::DroppedIssue(i));
                        None
                    }
                }
            })
            .collect(),
        _ => {
            defaulted.push(Defaulted::Issues);
            Vec::new()
        }
    };

    let suggested_text = match obj.get("suggestedText") {
        Some(Value::String(s)) => s.clone(),
        _ => {
            defaulted.push(Defaulted::SuggestedText);
            original_text.to_string()
        }
    };

    let required_disclosures = match obj.get("requiredDisclosures") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| match item {
                Value::String(s) => Some(s.clone()),
                _ => {
                    defaulted.push(Defaulted::DroppedDisclosure(i));
                    None
                }
            })
            .collect(),
        _ => {
            defaulted.push(Defaulted::RequiredDisclosures);
            Vec::new()
        }
    };

    let model_explanation = obj
        .get("modelExplanation")
        .and_then(Value::as_str)
        .map(str::to_string);

    Normalized {
        result: ComplianceCheckResult {
            risk_level,
            issues,
            suggested_text,
            required_disclosures,
            model_explanation,
        },
        defaulted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEXT: &str = "Perfect for young families!";

    fn full_payload() -> Value {
        json!({
            "riskLevel": "medium",
            "issues": [{
                "code": "FH_FAMILIAL_STATUS",
                "description": "Implies preference based on familial status.",
                "severity": "medium",
                "suggestion": "Describe the property, not the buyer.",
                "category": "fair_housing"
            }],
            "suggestedText": "Spacious home near parks and schools.",
            "requiredDisclosures": ["Equal Housing Opportunity"],
            "modelExplanation": "Familial status is a protected class."
        })
    }

    #[test]
    fn well_formed_payload_passes_through() {
        let normalized = normalize(&full_payload(), TEXT, RiskLevel::Low);
        assert!(normalized.is_clean());
        let result = normalized.result;
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, "FH_FAMILIAL_STATUS");
        assert_eq!(result.issues[0].category.as_deref(), Some("fair_housing"));
        assert_eq!(result.suggested_text, "Spacious home near parks and schools.");
        assert_eq!(result.required_disclosures, vec!["Equal Housing Opportunity"]);
        assert_eq!(
            result.model_explanation.as_deref(),
            Some("Familial status is a protected class.")
        );
    }

    #[test]
    fn missing_issues_become_empty() {
        let normalized = normalize(&json!({"riskLevel": "low"}), TEXT, RiskLevel::Low);
        assert!(normalized.result.issues.is_empty());
        assert!(normalized.defaulted.contains(&Defaulted::Issues));
    }

    #[test]
    fn missing_suggested_text_falls_back_to_input() {
        let normalized = normalize(&json!({"riskLevel": "high"}), TEXT, RiskLevel::Low);
        assert_eq!(normalized.result.suggested_text, TEXT);
        assert!(normalized.defaulted.contains(&Defaulted::SuggestedText));
    }

    #[test]
    fn non_string_suggested_text_falls_back_to_input() {
        let normalized = normalize(&json!({"suggestedText": 42}), TEXT, RiskLevel::Low);
        assert_eq!(normalized.result.suggested_text, TEXT);
    }

    #[test]
    fn invalid_risk_level_uses_fallback() {
        let low = normalize(&json!({"riskLevel": "critical"}), TEXT, RiskLevel::Low);
        assert_eq!(low.result.risk_level, RiskLevel::Low);
        assert!(low.defaulted.contains(&Defaulted::RiskLevel));

        let high = normalize(&json!({}), TEXT, RiskLevel::High);
        assert_eq!(high.result.risk_level, RiskLevel::High);
    }

    #[test]
    fn non_object_payload_is_fully_defaulted() {
        let normalized = normalize(&json!(["not", "an", "object"]), TEXT, RiskLevel::Low);
        assert_eq!(normalized.result.risk_level, RiskLevel::Low);
        assert!(normalized.result.issues.is_empty());
        assert_eq!(normalized.result.suggested_text, TEXT);
        assert!(normalized.result.required_disclosures.is_empty());
        assert!(normalized.result.model_explanation.is_none());
        assert_eq!(
            normalized.defaulted,
            vec![
                Defaulted::RiskLevel,
                Defaulted::Issues,
                Defaulted::SuggestedText,
                Defaulted::RequiredDisclosures,
            ]
        );
    }

    #[test]
    fn malformed_issues_are_dropped_and_reported() {
        let mut payload = full_payload();
        payload["issues"] = json!([
            {"code": "A", "description": "ok", "severity": "low"},
            {"code": "B", "severity": "extreme", "description": "bad severity"},
            "not an object",
        ]);
        let normalized = normalize(&payload, TEXT, RiskLevel::Low);
        assert_eq!(normalized.result.issues.len(), 1);
        assert_eq!(normalized.result.issues[0].code, "A");
        assert_eq!(
            normalized.defaulted,
            vec![Defaulted::DroppedIssue(1), Defaulted::DroppedIssue(2)]
        );
    }

    #[test]
    fn non_string_disclosures_are_dropped() {
        let mut payload = full_payload();
        payload["requiredDisclosures"] = json!(["NMLS #1234", 7, null, "Equal Housing"]);
        let normalized = normalize(&payload, TEXT, RiskLevel::Low);
        assert_eq!(
            normalized.result.required_disclosures,
            vec!["NMLS #1234", "Equal Housing"]
        );
        assert_eq!(
            normalized.defaulted,
            vec![Defaulted::DroppedDisclosure(1), Defaulted::DroppedDisclosure(2)]
        );
    }

    #[test]
    fn non_string_explanation_is_absent() {
        let mut payload = full_payload();
        payload["modelExplanation"] = json!({"nested": true});
        let normalized = normalize(&payload, TEXT, RiskLevel::Low);
        assert!(normalized.result.model_explanation.is_none());
    }

    #[test]
    fn defaulted_fields_render_as_json_paths() {
        assert_eq!(Defaulted::RiskLevel.to_string(), "riskLevel");
        assert_eq!(Defaulted::DroppedIssue(3).to_string(), "issues[3]");
        assert_eq!(
            Defaulted::DroppedDisclosure(0).to_string(),
            "requiredDisclosures[0]"
        );
    }
}
