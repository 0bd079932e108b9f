//! # Prometheus Metrics
//!
//! Metrics are recorded through the `metrics` facade and exported by
//! `metrics-exporter-prometheus`. The recorder is installed once by the
//! binary; without it every recording call is a no-op.
//!
//! | Metric | Kind | Labels |
//! |--------|------|--------|
//! | `copilot_http_requests_total` | counter | `status` |
//! | `copilot_checks_total` | counter | `outcome`, `risk_level` |
//! | `copilot_model_call_seconds` | histogram | |
//! | `copilot_model_tokens_total` | counter | `kind` |

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Buckets for the model call latency histogram, in seconds.
const MODEL_CALL_BUCKETS: &[f64] = &[0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 15.0, 30.0, 60.0];

fn builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("copilot_model_call_seconds".to_string()),
        MODEL_CALL_BUCKETS,
    )
}

/// Install the global Prometheus recorder and return its render handle.
///
/// Fails if a recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    builder()?.install_recorder()
}

/// Build a recorder without installing it globally. The handle renders an
/// empty exposition unless the recorder is installed by the caller.
pub fn detached_handle() -> Result<PrometheusHandle, BuildError> {
    Ok(builder()?.build_recorder().handle())
}

/// Middleware that counts responses by status code.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    metrics::counter!(
        "copilot_http_requests_total",
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);
    response
}

/// Router serving `GET /metrics` from `handle`.
pub fn router<S>(handle: PrometheusHandle) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(handle)
}

/// GET /metrics — Prometheus text exposition.
async fn render_metrics(State(handle): State<PrometheusHandle>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
        .into_response()
}
