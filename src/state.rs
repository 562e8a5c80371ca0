/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - guard: AuthGuard (JWKS 検証), catalog: actors/movies の保存先
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::Catalog;
use crate::services::auth::AuthGuard;

#[derive(Clone, Debug)]
pub struct AppState {
    pub guard: Arc<AuthGuard>,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(guard: Arc<AuthGuard>, catalog: Catalog) -> Self {
        Self { guard, catalog }
    }
}
