//! Health check endpoint.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "audio-intercept-api";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// `GET /health`: liveness only, never touches the oracle.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
