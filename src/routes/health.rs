use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// GET /health - Liveness probe
/// Returns 200 OK if the process is alive
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /ready - Readiness probe
/// The site has no external state to wait on; ready as soon as the
/// router is serving.
pub async fn ready() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ready"})))
}
