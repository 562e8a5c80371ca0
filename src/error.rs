/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthError / RepoError を統一的に変換
 *
 * Body: {"success": false, "error": <auth code | numeric status>, "message": "..."}
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorCode,
    pub message: String,
}

/// Auth failures carry a machine-readable code; everything else the status.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorCode {
    Code(&'static str),
    Status(u16),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("bad request: {0}")]
    BadRequest(&'static str),
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("unprocessable")]
    Unprocessable,
    #[error("internal server error")]
    Internal,
    /// Transport-level refusal (timeout, body too large, method not allowed).
    #[error("{0}")]
    Http(StatusCode),
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(e) => e.status(),
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Http(status) => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error, message) = match &self {
            AppError::Auth(e) => (ErrorCode::Code(e.code()), e.to_string()),
            AppError::BadRequest(reason) => (ErrorCode::Status(status.as_u16()), reason.to_string()),
            AppError::NotFound { resource } => (
                ErrorCode::Status(status.as_u16()),
                format!("{resource} not found"),
            ),
            AppError::Unprocessable => (ErrorCode::Status(status.as_u16()), "unprocessable".into()),
            AppError::Internal => (
                ErrorCode::Status(status.as_u16()),
                "internal server error".into(),
            ),
            AppError::Http(status) => (
                ErrorCode::Status(status.as_u16()),
                status
                    .canonical_reason()
                    .unwrap_or("error")
                    .to_lowercase(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            error,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::MissingReference(_) => AppError::Unprocessable,
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn auth_errors_carry_their_code_and_status() {
        let (status, body) = render(AuthError::InsufficientPermission.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "INSUFFICIENT_PERMISSION",
                "message": "permission not granted",
            })
        );

        let (status, body) = render(AuthError::PermissionsClaimMissing.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "PERMISSIONS_CLAIM_MISSING");
    }

    #[tokio::test]
    async fn other_errors_carry_the_numeric_status() {
        let (status, body) = render(AppError::not_found("actor")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"success": false, "error": 404, "message": "actor not found"})
        );

        let (status, body) = render(AppError::Unprocessable).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], 422);

        let (status, body) = render(AppError::Http(StatusCode::REQUEST_TIMEOUT)).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            body,
            json!({"success": false, "error": 408, "message": "request timeout"})
        );
    }
}
