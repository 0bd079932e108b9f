//! # Responses Adapter Interface
//!
//! The `ResponsesAdapter` trait abstracts over the model provider backend.
//! Production deployments use [`crate::ModelClient`] against the live API;
//! tests use [`MockResponsesAdapter`], which replays a scripted reply and
//! records every request it receives. This separation lets the compliance
//! checker and the HTTP layer run end-to-end without network access.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::ModelApiError;
use crate::responses::{ModelResponse, ResponsesRequest};

/// A backend that can create one model response.
#[async_trait]
pub trait ResponsesAdapter: Send + Sync {
    /// Send `request` and return the provider's response.
    ///
    /// Implementations perform exactly one attempt; no retries.
    async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ModelResponse, ModelApiError>;

    /// Human-readable adapter name for logs.
    fn adapter_name(&self) -> &'static str;
}

/// What a [`MockResponsesAdapter`] answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this response.
    Respond(ModelResponse),
    /// Fail as if the provider were unreachable.
    Unavailable(String),
    /// Fail as if the provider returned a non-2xx status.
    Status { status: u16, body: String },
    /// Wait before responding; used to exercise caller timeouts.
    Delayed {
        delay: std::time::Duration,
        response: ModelResponse,
    },
}

/// Scripted adapter for tests and local development.
///
/// Cloning shares the request log.
#[derive(Debug, Clone)]
pub struct MockResponsesAdapter {
    reply: MockReply,
    requests: Arc<Mutex<Vec<ResponsesRequest>>>,
}

impl MockResponsesAdapter {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always respond with `response`.
    pub fn responding(response: ModelResponse) -> Self {
        Self::new(MockReply::Respond(response))
    }

    /// Always respond with a single `output_json` block holding `json`.
    pub fn responding_json(json: serde_json::Value) -> Self {
        Self::responding(ModelResponse::output_json(json))
    }

    /// Always fail with a transport-style error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(MockReply::Unavailable(reason.into()))
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ResponsesRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl ResponsesAdapter for MockResponsesAdapter {
    async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ModelResponse, ModelApiError> {
        self.requests.lock().push(request.clone());

        match &self.reply {
            MockReply::Respond(response) => Ok(response.clone()),
            MockReply::Unavailable(reason) => Err(ModelApiError::Unavailable {
                reason: reason.clone(),
            }),
            MockReply::Status { status, body } => Err(ModelApiError::ApiError {
                endpoint: "POST /responses".into(),
                status: *status,
                body: body.clone(),
            }),
            MockReply::Delayed { delay, response } => {
                tokio::time::sleep(*delay).await;
                Ok(response.clone())
            }
        }
    }

    fn adapter_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ResponsesRequest {
        ResponsesRequest::json_schema("m", "prompt", 10, "S", json!({}))
    }

    #[tokio::test]
    async fn mock_replays_response_and_records_request() {
        let mock = MockResponsesAdapter::responding_json(json!({"riskLevel": "low"}));
        let resp = mock.create_response(&request()).await.unwrap();
        assert_eq!(resp.first_block().map(|b| b.kind()), Some("output_json"));
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.requests()[0].input, "prompt");
    }

    #[tokio::test]
    async fn mock_unavailable_returns_error() {
        let mock = MockResponsesAdapter::unavailable("connection refused");
        let err = mock.create_response(&request()).await.unwrap_err();
        assert!(matches!(err, ModelApiError::Unavailable { ref reason } if reason == "connection refused"));
    }

    #[tokio::test]
    async fn mock_status_returns_api_error() {
        let mock = MockResponsesAdapter::new(MockReply::Status {
            status: 429,
            body: "rate limited".into(),
        });
        let err = mock.create_response(&request()).await.unwrap_err();
        assert!(matches!(err, ModelApiError::ApiError { status: 429, .. }));
    }

    #[tokio::test]
    async fn clones_share_request_log() {
        let mock = MockResponsesAdapter::responding(ModelResponse::output_text("{}"));
        let clone = mock.clone();
        clone.create_response(&request()).await.unwrap();
        assert_eq!(mock.call_count(), 1);
    }
}
