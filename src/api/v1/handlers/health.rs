/*
 * Responsibility
 * - GET /health (疎通用)
 * - 認証・backend を一切通さない。route gate も `/api` を素通しする
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
