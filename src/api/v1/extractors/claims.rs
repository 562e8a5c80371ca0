use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{AuthError, ClaimSet};
use crate::state::AppState;

/// Handler で、検証済み ClaimSet を受け取るための extractor
/// `requires_auth` が ClaimSet を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す (ミドルウェア未設定のルート)
pub struct Claims(pub ClaimSet);

impl FromRequestParts<AppState> for Claims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ClaimSet>()
            .cloned()
            .map(Claims)
            .ok_or(AppError::Auth(AuthError::MissingAuthHeader))
    }
}
