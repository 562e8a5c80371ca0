#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use casting_agency::app::build_router;
use casting_agency::config::Config;
use casting_agency::repos::Catalog;
use casting_agency::services::auth::{AuthGuard, SigningKeySet, StaticKeySet};
use casting_agency::state::AppState;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ISSUER: &str = "https://casting-agency.example.com/";
pub const AUDIENCE: &str = "casting-agency";
pub const PRIMARY_KID: &str = "primary-key";

const PRIMARY_PEM: &str = include_str!("../fixtures/primary_rsa.pem");
const PRIMARY_JWKS: &str = include_str!("../fixtures/jwks.json");

pub const ASSISTANT: &[&str] = &["read:actor", "read:movie"];
pub const DIRECTOR: &[&str] = &[
    "read:actor",
    "read:movie",
    "add:actor",
    "delete:actor",
    "update:actor",
    "update:movie",
];
pub const PRODUCER: &[&str] = &[
    "read:actor",
    "read:movie",
    "add:actor",
    "delete:actor",
    "update:actor",
    "update:movie",
    "add:movie",
    "delete:movie",
];

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn config() -> Config {
    Config::from_lookup(|key| match key {
        "AUTH_ISSUER" => Some(ISSUER.to_string()),
        "AUTH_AUDIENCE" => Some(AUDIENCE.to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn app() -> Router {
    let keys = SigningKeySet::from_json(PRIMARY_JWKS.as_bytes()).unwrap();
    let guard = AuthGuard::new(Arc::new(StaticKeySet::new(keys)), ISSUER, AUDIENCE, 0);
    let state = AppState::new(Arc::new(guard), Catalog::new());
    build_router(state, &config())
}

pub fn claims(sub: &str, permissions: &[&str]) -> Value {
    json!({
        "iss": ISSUER,
        "sub": sub,
        "aud": [AUDIENCE, "https://casting-agency.example.com/userinfo"],
        "iat": now(),
        "exp": now() + 300,
        "permissions": permissions,
    })
}

pub fn sign(claims: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(PRIMARY_KID.to_string());
    let key = EncodingKey::from_rsa_pem(PRIMARY_PEM.as_bytes()).unwrap();
    jsonwebtoken::encode(&header, claims, &key).unwrap()
}

pub fn token_for(permissions: &[&str]) -> String {
    sign(&claims("auth0|tester", permissions))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
