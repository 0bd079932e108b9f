//! # Application State
//!
//! Service configuration and the state shared by every handler. Nothing in
//! here is mutated after startup: handlers only read the config and call
//! the checker.

use std::str::FromStr;
use std::sync::Arc;

use copilot_compliance::ComplianceChecker;
use copilot_core::RiskLevel;
use metrics_exporter_prometheus::PrometheusHandle;
use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 4000;

/// Default browser origin allowed by CORS.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Log output style for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected pretty or json")),
        }
    }
}

/// Service-level configuration. Provider settings live in
/// [`copilot_model_client::ModelApiConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// The single origin allowed to call the API from a browser.
    pub cors_allowed_origin: String,
    /// Risk level used when the model omits or garbles `riskLevel`.
    pub risk_level_fallback: RiskLevel,
    /// Whether `/metrics` is mounted.
    pub metrics_enabled: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_allowed_origin: DEFAULT_CORS_ORIGIN.to_string(),
            risk_level_fallback: RiskLevel::Low,
            metrics_enabled: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 4000)
    /// - `CORS_ALLOWED_ORIGIN` (default: `http://localhost:3000`)
    /// - `RISK_LEVEL_FALLBACK` (default: `low`)
    /// - `COPILOT_METRICS_ENABLED` (default: `true`)
    /// - `LOG_FORMAT` (default: `pretty`)
    pub fn from_env() -> Result<Self, AppConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| invalid("PORT", e))?,
            None => defaults.port,
        };

        let risk_level_fallback = match get("RISK_LEVEL_FALLBACK") {
            Some(raw) => raw
                .trim()
                .to_ascii_lowercase()
                .parse::<RiskLevel>()
                .map_err(|e| invalid("RISK_LEVEL_FALLBACK", e))?,
            None => defaults.risk_level_fallback,
        };

        let metrics_enabled = match get("COPILOT_METRICS_ENABLED") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid("COPILOT_METRICS_ENABLED", format!("'{raw}' is not a boolean"))
            })?,
            None => defaults.metrics_enabled,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(|e| invalid("LOG_FORMAT", e))?,
            None => defaults.log_format,
        };

        Ok(Self {
            port,
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN")
                .map(|o| o.trim().to_string())
                .unwrap_or(defaults.cors_allowed_origin),
            risk_level_fallback,
            metrics_enabled,
            log_format,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(var: &str, reason: impl std::fmt::Display) -> AppConfigError {
    AppConfigError::InvalidValue {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}

/// Service configuration errors.
#[derive(Error, Debug, PartialEq)]
pub enum AppConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub checker: ComplianceChecker,
    pub config: Arc<AppConfig>,
    /// Render handle for `/metrics`; `None` leaves the route unmounted.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("checker", &self.checker)
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    pub fn new(checker: ComplianceChecker, config: AppConfig) -> Self {
        Self {
            checker,
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` route.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
