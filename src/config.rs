/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, CORS 許可, Auth/JWKS 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::services::auth::guard::MAX_LEEWAY_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub access_token_leeway_seconds: u64,

    pub jwks_url: Url,
    pub jwks_cache_ttl: Duration,
    pub jwks_min_refresh: Duration,
    pub jwks_fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 8080)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_issuer = required(&lookup, "AUTH_ISSUER")?;
        let auth_audience = required(&lookup, "AUTH_AUDIENCE")?;

        let access_token_leeway_seconds: u64 =
            parse_or(&lookup, "ACCESS_TOKEN_LEEWAY_SECONDS", 0)?;
        if access_token_leeway_seconds > MAX_LEEWAY_SECONDS {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"));
        }

        let jwks_url = match lookup("JWKS_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid("JWKS_URL"))?,
            None => jwks_url_for_issuer(&auth_issuer)?,
        };

        let jwks_cache_ttl = Duration::from_secs(parse_or(&lookup, "JWKS_CACHE_TTL_SECONDS", 600)?);
        let jwks_min_refresh =
            Duration::from_secs(parse_or(&lookup, "JWKS_MIN_REFRESH_SECONDS", 30)?);

        let jwks_fetch_timeout_seconds: u64 = parse_or(&lookup, "JWKS_FETCH_TIMEOUT_SECONDS", 5)?;
        if jwks_fetch_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("JWKS_FETCH_TIMEOUT_SECONDS"));
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            jwks_url,
            jwks_cache_ttl,
            jwks_min_refresh,
            jwks_fetch_timeout: Duration::from_secs(jwks_fetch_timeout_seconds),
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

// Absent → default, present but unparseable → Invalid (a typo should not silently fall back).
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// `<issuer>/.well-known/jwks.json`, tolerating issuers with or without a trailing slash.
fn jwks_url_for_issuer(issuer: &str) -> Result<Url, ConfigError> {
    let base = format!("{}/", issuer.trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|base| base.join(".well-known/jwks.json"))
        .map_err(|_| ConfigError::Invalid("AUTH_ISSUER"))
}
