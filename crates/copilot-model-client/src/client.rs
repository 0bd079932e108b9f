//! HTTP client for the provider's Responses endpoint.
//!
//! Wraps a `reqwest::Client` with the bearer credential, base URL and
//! per-request timeout. One attempt per call: retry policy, if any, belongs
//! to the caller.

use std::time::Duration;

use async_trait::async_trait;

use crate::adapter::ResponsesAdapter;
use crate::config::ModelApiConfig;
use crate::error::ModelApiError;
use crate::responses::{ModelResponse, ResponsesRequest};

const RESPONSES_ENDPOINT: &str = "POST /responses";

/// Longest provider error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for the provider's Responses API.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl ModelClient {
    /// Create a new client from configuration.
    pub fn new(config: &ModelApiConfig) -> Result<Self, ModelApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_key.as_str()))
                .map_err(|_| ModelApiError::Unavailable {
                    reason: "invalid API key characters".into(),
                })?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ModelApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_secs.saturating_mul(1000),
        })
    }

    /// Create a model response.
    ///
    /// Calls `POST {base_url}/responses`.
    pub async fn create(&self, req: &ResponsesRequest) -> Result<ModelResponse, ModelApiError> {
        let url = format!("{}/responses", self.base_url);

        tracing::debug!(
            model = %req.model,
            max_output_tokens = req.max_output_tokens,
            "sending Responses API request"
        );

        let resp = self.http.post(&url).json(req).send().await.map_err(|e| {
            if e.is_timeout() {
                ModelApiError::Timeout {
                    endpoint: RESPONSES_ENDPOINT.into(),
                    elapsed_ms: self.timeout_ms,
                }
            } else {
                ModelApiError::Http {
                    endpoint: RESPONSES_ENDPOINT.into(),
                    source: e,
                }
            }
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| ModelApiError::Http {
            endpoint: RESPONSES_ENDPOINT.into(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(ModelApiError::ApiError {
                endpoint: RESPONSES_ENDPOINT.into(),
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ModelApiError::Deserialization {
            endpoint: RESPONSES_ENDPOINT.into(),
            source: e,
        })
    }
}

#[async_trait]
impl ResponsesAdapter for ModelClient {
    async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ModelResponse, ModelApiError> {
        self.create(request).await
    }

    fn adapter_name(&self) -> &'static str {
        "http"
    }
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push_str("...");
    cut
}
