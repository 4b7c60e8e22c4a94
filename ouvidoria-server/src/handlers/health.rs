//! Health check handlers
//!
//! Provides health and readiness endpoints for monitoring and orchestration.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status: "healthy" or "degraded"
    pub status: &'static str,
    /// Server version from Cargo.toml
    pub version: &'static str,
    /// Whether the speech-to-text provider is configured
    pub transcription_available: bool,
    /// Service name
    pub service: &'static str,
}

/// GET /health - Health check endpoint
///
/// Returns JSON with service status, version, and transcription availability.
/// Used for monitoring and load balancer health checks.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health report", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let transcription_available = state.transcriber.is_some();

    // Submissions and tracking work without transcription, hence only degraded
    let status = if transcription_available {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        transcription_available,
        service: "ouvidoria-server",
    })
}

/// Readiness response for orchestration probes
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Whether the service is ready to accept traffic
    pub ready: bool,
}

/// GET /ready - Readiness probe
///
/// Returns 200 if the service is ready to accept traffic.
/// Unlike /health, this is a simple yes/no check.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse)
    )
)]
pub async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse { ready: true })
}
