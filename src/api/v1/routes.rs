/*
 * Responsibility
 * - URL 構造と、ルートごとの必要 permission を定義
 * - 公開: /, /health
 * - 認証のみ: /headers
 * - permission 付き: /actors, /movies (メソッドごとに requires_auth を掛ける)
 */
use axum::{
    Router,
    routing::{MethodRouter, delete, get, patch, post},
};

use crate::api::v1::handlers::{
    actors::{add_actor, delete_actor, get_actor, list_actors, update_actor},
    index::{health, index, not_found, show_claims},
    movies::{add_movie, delete_movie, get_movie, list_movies, update_movie},
};
use crate::middleware::auth::requires_auth;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let auth = |permission: Option<&'static str>, route: MethodRouter<AppState>| {
        requires_auth(state, permission, route)
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/headers", auth(None, get(show_claims)))
        .route("/actors", auth(Some("read:actor"), get(list_actors)))
        .route("/actors", auth(Some("add:actor"), post(add_actor)))
        .route("/actors/{id}", auth(Some("read:actor"), get(get_actor)))
        .route("/actors/{id}", auth(Some("update:actor"), patch(update_actor)))
        .route("/actors/{id}", auth(Some("delete:actor"), delete(delete_actor)))
        .route("/movies", auth(Some("read:movie"), get(list_movies)))
        .route("/movies", auth(Some("add:movie"), post(add_movie)))
        .route("/movies/{id}", auth(Some("read:movie"), get(get_movie)))
        .route("/movies/{id}", auth(Some("update:movie"), patch(update_movie)))
        .route("/movies/{id}", auth(Some("delete:movie"), delete(delete_movie)))
        .fallback(not_found)
}
