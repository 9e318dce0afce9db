/// Company resolution and report generation handlers.
pub mod report;

use axum::Json;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is healthy")),
    tag = "health"
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
