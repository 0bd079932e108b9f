//! # Prompt and Output Schema
//!
//! Builds the single prompt sent to the model and the strict JSON schema
//! its answer must follow. The schema is declared once here and used both
//! in the request and for local conformance checks of the reply.

use copilot_core::{select_policy, ComplianceCheckInput};
use copilot_model_client::ResponsesRequest;
use serde_json::{json, Value};

/// Name under which the output schema is registered with the provider.
pub const SCHEMA_NAME: &str = "ComplianceCheckResult";

const INSTRUCTION: &str = "Review the following message for compliance.\n\
                           Return ONLY JSON that matches the provided schema.";

/// The strict output schema for a compliance check result.
///
/// Every property is required and no extra properties are allowed, as the
/// provider's strict mode demands.
pub fn output_schema() -> Value {
    let risk_enum = json!(["low", "medium", "high"]);

    json!({
        "type": "object",
        "properties": {
            "riskLevel": {
                "type": "string",
                "enum": risk_enum
            },
            "issues": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "code": { "type": "string" },
                        "description": { "type": "string" },
                        "severity": { "type": "string", "enum": risk_enum },
                        "suggestion": { "type": "string" },
                        "category": { "type": "string" }
                    },
                    "required": ["code", "description", "severity", "suggestion", "category"],
                    "additionalProperties": false
                }
            },
            "suggestedText": { "type": "string" },
            "requiredDisclosures": {
                "type": "array",
                "items": { "type": "string" }
            },
            "modelExplanation": { "type": "string" }
        },
        "required": [
            "riskLevel",
            "issues",
            "suggestedText",
            "requiredDisclosures",
            "modelExplanation"
        ],
        "additionalProperties": false
    })
}

/// Assemble the prompt: policy text, the JSON-only instruction, then the
/// message verbatim between `"""` delimiters.
pub fn build_prompt(policy: &str, text: &str) -> String {
    format!("{policy}\n{INSTRUCTION}\n\nMessage from agent:\n\"\"\"{text}\"\"\"")
}

/// Build the complete Responses request for `input`.
pub fn build_request(
    input: &ComplianceCheckInput,
    model: &str,
    max_output_tokens: u32,
) -> ResponsesRequest {
    let policy = select_policy(input);
    ResponsesRequest::json_schema(
        model,
        build_prompt(&policy, &input.text),
        max_output_tokens,
        SCHEMA_NAME,
        output_schema(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use copilot_core::{Channel, Industry};
    use copilot_model_client::responses::TextFormat;

    #[test]
    fn prompt_contains_policy_instruction_and_delimited_text() {
        let prompt = build_prompt("POLICY BODY\n", "Guaranteed returns!");
        assert!(prompt.starts_with("POLICY BODY\n"));
        assert!(prompt.contains("Return ONLY JSON that matches the provided schema."));
        assert!(prompt.ends_with("Message from agent:\n\"\"\"Guaranteed returns!\"\"\""));
    }

    #[test]
    fn prompt_keeps_text_verbatim() {
        let text = "line one\n  \"quoted\" and \"\"\" triple";
        let prompt = build_prompt("P", text);
        assert!(prompt.contains(text));
    }

    #[test]
    fn schema_requires_every_property() {
        let schema = output_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(required.len(), properties.len());
        for key in properties.keys() {
            assert!(required.contains(&key.as_str()), "{key} not required");
        }
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(
            schema["properties"]["issues"]["items"]["additionalProperties"],
            false
        );
    }

    #[test]
    fn request_uses_strict_named_schema() {
        let input = ComplianceCheckInput::new("Call me today", Industry::Finance)
            .unwrap()
            .with_jurisdiction("NY")
            .with_channel(Channel::Sms);
        let req = build_request(&input, "gpt-4.1-mini", 800);

        assert_eq!(req.model, "gpt-4.1-mini");
        assert_eq!(req.max_output_tokens, 800);
        assert!(req.input.contains("Jurisdiction: NY"));
        assert!(req.input.contains("Channel: sms"));
        assert!(req.input.contains("\"\"\"Call me today\"\"\""));
        match &req.text.format {
            TextFormat::JsonSchema {
                name,
                schema,
                strict,
            } => {
                assert_eq!(name, SCHEMA_NAME);
                assert!(*strict);
                assert_eq!(schema, &output_schema());
            }
        }
    }
}
