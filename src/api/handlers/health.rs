//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Credential**: Upstream API key is configured
/// 2. **Sources**: Size of the source catalog
///
/// No upstream call is made.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let credential_check = check_credential(&state);

    let sources_check = check_sources(&state);

    let all_healthy = credential_check.status == "ok" && sources_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            credential: credential_check,
            sources: sources_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_credential(state: &AppState) -> CheckStatus {
    if state.metadata_service.has_credential() {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Upstream API key configured".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("WQXR_API_KEY is not set".to_string()),
        }
    }
}

fn check_sources(state: &AppState) -> CheckStatus {
    let names: Vec<&str> = state
        .catalog
        .sources()
        .iter()
        .map(|s| s.id.as_str())
        .collect();

    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!("{} configured: {}", names.len(), names.join(", "))),
    }
}
