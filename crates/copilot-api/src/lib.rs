//! # copilot-api — Axum API Service
//!
//! The HTTP surface of the compliance copilot, built on Axum/Tower/Tokio.
//!
//! ## Routes
//!
//! - `GET /` — service identity `{"ok": true, "service": "compliance-api"}`
//! - `GET /health` — plain-text liveness probe
//! - `POST /api/compliance/check-message` — review one message
//! - `GET /openapi.json` — generated OpenAPI document
//! - `GET /metrics` — Prometheus exposition (when enabled)
//!
//! ## Middleware Stack (Tower)
//!
//! CorsLayer → DefaultBodyLimit → TraceLayer → request metrics
//!
//! ## Crate Policy
//!
//! - Handlers translate HTTP only; checks run in `copilot-compliance`.
//! - All errors map to the fixed JSON bodies via `AppError`.
//! - Only the configured origin passes CORS.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origin);

    let mut router = Router::new()
        .merge(routes::health::router())
        .merge(routes::compliance::router())
        .merge(openapi::router());

    if let Some(handle) = state.metrics.clone().filter(|_| state.config.metrics_enabled) {
        router = router.merge(middleware::metrics::router(handle));
    }

    router
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

/// CORS policy admitting exactly one origin.
///
/// An origin that is not a valid header value admits nothing.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(e) => {
            tracing::warn!(origin, error = %e, "invalid CORS origin; cross-origin requests disabled");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
