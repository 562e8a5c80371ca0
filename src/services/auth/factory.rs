/// Factory: build `AuthGuard` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthGuard, KeySetError, RemoteJwks};

pub fn build_auth_guard(config: &Config) -> Result<Arc<AuthGuard>, KeySetError> {
    let jwks = RemoteJwks::new(
        config.jwks_url.clone(),
        config.jwks_cache_ttl,
        config.jwks_min_refresh,
        config.jwks_fetch_timeout,
    )?;

    tracing::info!(jwks_url = %jwks.url(), issuer = %config.auth_issuer, "auth guard configured");

    Ok(Arc::new(AuthGuard::new(
        Arc::new(jwks),
        config.auth_issuer.clone(),
        config.auth_audience.clone(),
        config.access_token_leeway_seconds,
    )))
}
