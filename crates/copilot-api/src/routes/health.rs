//! Service identity and liveness probes. Unauthenticated, no side effects.

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Name reported by `GET /`.
pub const SERVICE_NAME: &str = "compliance-api";

/// Response body of `GET /`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub ok: bool,
    pub service: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
}

/// GET / — Service identity.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = ServiceInfo)),
    tag = "health"
)]
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        ok: true,
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /health — Plain-text liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is alive", body = String, content_type = "text/plain")),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "ok"
}
