//! Fixtures for minting tokens in unit tests.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use super::key_set::SigningKeySet;

pub const ISSUER: &str = "https://casting-agency.example.com/";
pub const AUDIENCE: &str = "casting-agency";

pub const PRIMARY_KID: &str = "primary-key";
pub const ROTATED_KID: &str = "rotated-key";

pub const PRIMARY_PEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/primary_rsa.pem"
));
pub const ROGUE_PEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/rogue_rsa.pem"
));
/// Publishes the primary key under `PRIMARY_KID`.
pub const PRIMARY_JWKS: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/jwks.json"));
/// Publishes the rogue key under `ROTATED_KID`.
pub const ROTATED_JWKS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/rotated_jwks.json"
));

pub const PRIMARY_MODULUS: &str = "vd3aLJXhCiW9y55eQ6O9uBZExabnwYi4cfVm_BAY9bx99r892nfmSQaECTOI7JijqqQjy4lZkbgrY5icyKexIjGlfi122iGkrbchqtd7nyDMFkGEQkKFF57pDwA_-qVWjiahNFPtGe8A8VL3zW_awkOkxjHrO3d_MLvrXoGlndItdoc1vmPvLwtCAQiyHOW8SNOk-IGgY2g1yAbSsmdDIZ0jAnV5wUodGHloylEUYgPzqi5q_MST9jL38qELwt2JFxm7QS6U3y1EH8Gc5bPuCJ4htc_Lg3TG3nSUjdD3ifAkgu_mo9Ok9FVFj_JgJnPe6-uXKMPu2OmVPEpRpL-mzw";

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn primary_key_set() -> SigningKeySet {
    SigningKeySet::from_json(PRIMARY_JWKS.as_bytes()).unwrap()
}

/// Auth0-shaped access token claims, valid for five minutes.
pub fn claims_with(permissions: &[&str]) -> Value {
    json!({
        "iss": ISSUER,
        "sub": "auth0|casting-assistant",
        "aud": AUDIENCE,
        "iat": now(),
        "exp": now() + 300,
        "azp": "casting-agency-spa",
        "scope": "",
        "permissions": permissions,
    })
}

pub fn sign_primary(claims: &Value) -> String {
    sign(claims, PRIMARY_KID, PRIMARY_PEM)
}

pub fn sign_rogue(claims: &Value, kid: &str) -> String {
    sign(claims, kid, ROGUE_PEM)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn sign(claims: &Value, kid: &str, pem: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&header, claims, &key).unwrap()
}
