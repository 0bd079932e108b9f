//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Compliance Copilot API",
        version = "0.1.0",
        description = "Reviews agent messages for industry compliance and suggests safer wording.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::health::service_info,
        crate::routes::health::health,
        crate::routes::compliance::check_message,
    ),
    components(schemas(
        crate::routes::compliance::CheckMessageRequest,
        crate::routes::health::ServiceInfo,
        crate::error::ErrorBody,
        copilot_core::ComplianceCheckResult,
        copilot_core::ComplianceIssue,
        copilot_core::RiskLevel,
        copilot_core::Industry,
        copilot_core::Channel,
    )),
    tags(
        (name = "health", description = "Service identity and liveness"),
        (name = "compliance", description = "Message compliance checks"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_documents_every_route() {
        let spec = ApiDoc::openapi();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/compliance/check-message"));
    }

    #[test]
    fn spec_registers_result_schema() {
        let spec = ApiDoc::openapi();
        let schemas = &spec.components.as_ref().unwrap().schemas;
        assert!(schemas.contains_key("ComplianceCheckResult"));
        assert!(schemas.contains_key("CheckMessageRequest"));
        assert!(schemas.contains_key("ErrorBody"));
    }
}
