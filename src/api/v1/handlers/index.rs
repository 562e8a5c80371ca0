/*
 * Responsibility
 * - GET / と GET /health (公開・疎通用)
 * - GET /headers (認証のみ、検証済み claims をそのまま返す)
 * - 未定義ルートの 404
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::api::v1::extractors::Claims;
use crate::error::AppError;

pub async fn index() -> impl IntoResponse {
    Json(json!({"message": "hello world"}))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn show_claims(Claims(claims): Claims) -> impl IntoResponse {
    Json(json!({"message": "granted", "content": claims}))
}

pub async fn not_found() -> AppError {
    AppError::not_found("resource")
}
