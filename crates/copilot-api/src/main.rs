//! # copilot-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the compliance copilot.
//! Binds to configurable port (default 4000). Refuses to start without
//! `OPENAI_API_KEY`.

use std::sync::Arc;

use copilot_api::state::{AppConfig, AppState, LogFormat};
use copilot_compliance::{CheckerSettings, ComplianceChecker};
use copilot_model_client::{ModelApiConfig, ModelClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies.
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let model_config = ModelApiConfig::from_env().map_err(|e| {
        tracing::error!("model provider not configured: {e}");
        e
    })?;
    tracing::info!(
        base_url = %model_config.base_url,
        model = %model_config.model,
        timeout_secs = model_config.timeout_secs,
        "model provider configured"
    );

    let client = ModelClient::new(&model_config)?;
    let settings = CheckerSettings::from_model_config(&model_config, config.risk_level_fallback);
    let checker = ComplianceChecker::new(Arc::new(client), settings);

    let mut state = AppState::new(checker, config.clone());
    if config.metrics_enabled {
        let handle = copilot_api::middleware::metrics::install_recorder()?;
        state = state.with_metrics(handle);
    }

    let app = copilot_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("compliance-api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
