//! Bearer token verification → `ClaimSet` in request extensions.
//!
//! Each protected method route is wrapped individually, so one path can
//! require different permissions per method (`GET /actors` → `read:actor`,
//! `POST /actors` → `add:actor`).

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::state::AppState;

/// Wrap `route` so it only runs for callers whose token verifies and, when
/// `permission` is `Some`, grants that permission.
///
/// ```ignore
/// Router::new()
///     .route("/actors", requires_auth(&state, Some("read:actor"), get(list_actors)))
///     .route("/actors", requires_auth(&state, Some("add:actor"), post(add_actor)))
///     .route("/headers", requires_auth(&state, None, get(show_claims)))
/// ```
pub fn requires_auth(
    state: &AppState,
    permission: Option<&'static str>,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    route.route_layer(middleware::from_fn_with_state(
        state.clone(),
        move |State(state): State<AppState>, req: Request<Body>, next: Next| {
            access_middleware(state, permission, req, next)
        },
    ))
}

async fn access_middleware(
    state: AppState,
    permission: Option<&'static str>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = match state.guard.authorize(req.headers(), permission).await {
        Ok(claims) => claims,
        Err(err) => {
            // never log the token itself
            tracing::warn!(
                code = err.code(),
                status = err.status().as_u16(),
                method = %req.method(),
                path = %req.uri().path(),
                required_permission = permission.unwrap_or("-"),
                "authorization refused"
            );
            return Err(err.into());
        }
    };

    tracing::debug!(sub = claims.sub.as_deref().unwrap_or("-"), "authorized");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
