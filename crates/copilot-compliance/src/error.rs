//! # Check Errors
//!
//! Every way a compliance check can fail. The HTTP layer shows callers only
//! a generic message for anything but [`CheckError::Validation`]; the
//! variant detail goes to the server log.

use copilot_core::ValidationError;
use copilot_model_client::ModelApiError;
use thiserror::Error;

/// Failure of a single compliance check. Terminal for that request.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The input is missing a required field.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The model call failed or returned no usable content: transport
    /// failure, non-2xx status, timeout, refusal, empty output, or an
    /// unrecognized content block type.
    #[error("external response error: {reason}")]
    ExternalResponse {
        /// What went wrong, including any refusal text.
        reason: String,
    },

    /// The model returned textual content that is not valid JSON.
    #[error("malformed model response: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
    },
}

impl CheckError {
    pub(crate) fn external(reason: impl Into<String>) -> Self {
        Self::ExternalResponse {
            reason: reason.into(),
        }
    }

    /// Short machine-readable label, used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ExternalResponse { .. } => "external_response",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }
}

/// Transport, status and payload failures of the model call are all
/// external-response failures from the checker's point of view.
impl From<ModelApiError> for CheckError {
    fn from(err: ModelApiError) -> Self {
        Self::external(err.to_string())
    }
}
