//! Wire types for the provider's Responses endpoint.
//!
//! ## Request
//!
//! `POST {base_url}/responses` with a single string `input`, an output cap,
//! and a `text.format` of type `json_schema` naming the schema the model must
//! follow.
//!
//! ## Response
//!
//! An `output` array of items, each with a `content` array of typed blocks.
//! Only three block types carry a usable answer: `output_text`,
//! `output_json` and `refusal`. Any other type is preserved as
//! [`ContentBlock::Other`] so callers can report it.
//!
//! Fields use `#[serde(default)]` for resilience against schema evolution;
//! unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// -- Request ------------------------------------------------------------------

/// Body of a Responses API request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: String,
    pub max_output_tokens: u32,
    pub text: TextConfig,
}

/// Output text configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextConfig {
    pub format: TextFormat,
}

/// Requested output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextFormat {
    /// Constrain output to a named JSON schema.
    JsonSchema {
        name: String,
        schema: Value,
        strict: bool,
    },
}

impl ResponsesRequest {
    /// Build a request that asks for output matching `schema`.
    pub fn json_schema(
        model: impl Into<String>,
        input: impl Into<String>,
        max_output_tokens: u32,
        schema_name: impl Into<String>,
        schema: Value,
    ) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            max_output_tokens,
            text: TextConfig {
                format: TextFormat::JsonSchema {
                    name: schema_name.into(),
                    schema,
                    strict: true,
                },
            },
        }
    }
}

// -- Response -----------------------------------------------------------------

/// Responses API payload, reduced to what compliance review consumes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ModelResponse {
    #[serde(default)]
    pub id: Option<String>,
    /// `completed`, `incomplete`, `failed`, ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub incomplete_details: Option<IncompleteDetails>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ModelResponse {
    /// A response with a single output item holding `blocks`.
    pub fn with_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            status: Some("completed".to_string()),
            output: vec![OutputItem {
                kind: Some("message".to_string()),
                content: blocks,
            }],
            ..Self::default()
        }
    }

    /// A response whose answer is textual JSON.
    pub fn output_text(text: impl Into<String>) -> Self {
        Self::with_blocks(vec![ContentBlock::OutputText { text: text.into() }])
    }

    /// A response whose answer is already structured JSON.
    pub fn output_json(json: Value) -> Self {
        Self::with_blocks(vec![ContentBlock::OutputJson { json }])
    }

    /// A response in which the model declined to answer.
    pub fn refusal(reason: impl Into<String>) -> Self {
        Self::with_blocks(vec![ContentBlock::Refusal {
            refusal: reason.into(),
        }])
    }

    /// The first content block of the first output item, if any.
    pub fn first_block(&self) -> Option<&ContentBlock> {
        self.output.first().and_then(|item| item.content.first())
    }

    /// Whether the provider stopped early (e.g. output cap reached).
    pub fn is_incomplete(&self) -> bool {
        self.status.as_deref() == Some("incomplete")
    }
}

/// One entry of the `output` array.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OutputItem {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// A typed content block inside an output item.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// JSON encoded as text; must be parsed.
    OutputText { text: String },
    /// JSON already decoded by the provider.
    OutputJson { json: Value },
    /// The model refused; `refusal` holds its stated reason.
    Refusal { refusal: String },
    /// Any other block type, kept by name only.
    Other { kind: String },
}

impl ContentBlock {
    /// The block's `type` discriminator.
    pub fn kind(&self) -> &str {
        match self {
            Self::OutputText { .. } => "output_text",
            Self::OutputJson { .. } => "output_json",
            Self::Refusal { .. } => "refusal",
            Self::Other { kind } => kind,
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let mut value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("type"))?
            .to_string();

        match kind.as_str() {
            "output_text" => match value.get_mut("text").map(Value::take) {
                Some(Value::String(text)) => Ok(Self::OutputText { text }),
                _ => Err(D::Error::missing_field("text")),
            },
            "output_json" => {
                let json = value
                    .get_mut("json")
                    .map(Value::take)
                    .ok_or_else(|| D::Error::missing_field("json"))?;
                Ok(Self::OutputJson { json })
            }
            "refusal" => {
                let refusal = value
                    .get("refusal")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Ok(Self::Refusal { refusal })
            }
            _ => Ok(Self::Other { kind }),
        }
    }
}

/// Why a response stopped before completing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct IncompleteDetails {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}
