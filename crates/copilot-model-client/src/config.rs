//! Model provider client configuration.
//!
//! Defaults point at the public OpenAI Responses API. Override via
//! environment variables or explicit construction for proxies and tests.

use url::Url;
use zeroize::Zeroizing;

/// Default provider base URL. The client appends `/responses`.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model used for compliance review.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Default per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on generated output tokens.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 800;

/// Configuration for connecting to the model provider.
///
/// Custom `Debug` implementation redacts the `api_key` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ModelApiConfig {
    /// Base URL of the provider API, e.g. `https://api.openai.com/v1`.
    pub base_url: Url,
    /// Bearer credential. Zeroed on drop.
    pub api_key: Zeroizing<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Upper bound on output tokens per response.
    pub max_output_tokens: u32,
}

impl std::fmt::Debug for ModelApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl ModelApiConfig {
    /// Create a configuration with default URL, model and limits.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            base_url: parse_url("OPENAI_BASE_URL", DEFAULT_BASE_URL)?,
            api_key: Zeroizing::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `OPENAI_API_KEY` (required, non-empty)
    /// - `OPENAI_BASE_URL` (default: `https://api.openai.com/v1`)
    /// - `OPENAI_MODEL` (default: `gpt-4.1-mini`)
    /// - `OPENAI_TIMEOUT_SECS` (default: 30)
    /// - `OPENAI_MAX_OUTPUT_TOKENS` (default: 800)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = match lookup("OPENAI_BASE_URL") {
            Some(raw) => parse_url("OPENAI_BASE_URL", &raw)?,
            None => parse_url("OPENAI_BASE_URL", DEFAULT_BASE_URL)?,
        };

        let timeout_secs = parse_number(&lookup, "OPENAI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "OPENAI_TIMEOUT_SECS".to_string(),
                "must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            api_key: Zeroizing::new(api_key),
            model: lookup("OPENAI_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_secs,
            max_output_tokens: parse_number(
                &lookup,
                "OPENAI_MAX_OUTPUT_TOKENS",
                DEFAULT_MAX_OUTPUT_TOKENS,
            )?,
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(base_url: &str, api_key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("base_url", base_url)?,
            api_key: Zeroizing::new(api_key.to_string()),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 5,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        })
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn parse_number<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(var.to_string(), e.to_string())),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
