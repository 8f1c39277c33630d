//! # GET /health

use axum::Json;
use blob_gateway_types::HealthResponse;

/// GET /health — 死活監視。ストレージには接続しない。
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
