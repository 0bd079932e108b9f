//! Pulls the JSON payload out of a model response.
//!
//! Only the first content block of the first output item is consulted.

use copilot_model_client::{ContentBlock, ModelResponse};
use serde_json::Value;

use crate::error::CheckError;

/// Return the JSON answer carried by `response`.
///
/// # Errors
///
/// - [`CheckError::ExternalResponse`] when there is no block, the model
///   refused, or the block type is not one that carries an answer.
/// - [`CheckError::MalformedResponse`] when an `output_text` block is not
///   valid JSON.
pub fn extract_payload(response: &ModelResponse) -> Result<Value, CheckError> {
    match response.first_block() {
        None => Err(CheckError::external("no content in model response")),
        Some(ContentBlock::Refusal { refusal }) => {
            Err(CheckError::external(format!("model refused: {refusal}")))
        }
        Some(ContentBlock::OutputText { text }) => serde_json::from_str(text)
            .map_err(|source| CheckError::MalformedResponse { source }),
        Some(ContentBlock::OutputJson { json }) => Ok(json.clone()),
        Some(ContentBlock::Other { kind }) => Err(CheckError::external(format!(
            "unexpected content type: {kind}"
        ))),
    }
}
