//! AuthGuard: bearer token → verified `ClaimSet`, or a terminal `AuthError`.

use std::fmt;
use std::sync::Arc;

use axum::http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Validation, decode, decode_header};

use super::bearer::extract_bearer;
use super::claims::{ClaimSet, RawClaims};
use super::error::AuthError;
use super::key_set::KeyProvider;

/// Largest accepted clock skew allowance. `jsonwebtoken` computes
/// `now - leeway` unchecked.
pub const MAX_LEEWAY_SECONDS: u64 = 300;

/// Stateless per-request verifier. The only shared state is the key provider.
#[derive(Clone)]
pub struct AuthGuard {
    keys: Arc<dyn KeyProvider>,
    issuer: String,
    audience: String,
    leeway_seconds: u64,
}

impl fmt::Debug for AuthGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGuard")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl AuthGuard {
    pub fn new(
        keys: Arc<dyn KeyProvider>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        leeway_seconds: u64,
    ) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
            leeway_seconds: leeway_seconds.min(MAX_LEEWAY_SECONDS),
        }
    }

    /// Authorize one request.
    ///
    /// `required_permission = None` admits any authenticated caller.
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        required_permission: Option<&str>,
    ) -> Result<ClaimSet, AuthError> {
        let token = extract_bearer(headers)?;
        let claims = self.verify(token).await?;

        if let Some(permission) = required_permission {
            check_permission(&claims, permission)?;
        }

        Ok(claims)
    }

    /// Signature + standard claim verification.
    pub async fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        if !is_compact_jws(token) {
            return Err(AuthError::MalformedToken);
        }

        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.ok_or(AuthError::MalformedToken)?;

        let key = match self.keys.find(&kid).await {
            Ok(Some(key)) => key,
            Ok(None) => return Err(AuthError::UnknownSigningKey),
            Err(err) => {
                tracing::warn!(error = %err, kid = %kid, "signing key set unavailable");
                return Err(AuthError::UnknownSigningKey);
            }
        };

        // Pinned to the key's algorithm: a token advertising anything else
        // (HS256 with the public key as secret, ...) fails before any crypto.
        let mut validation = Validation::new(key.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = self.leeway_seconds;

        let data = decode::<RawClaims>(token, &key.decoding_key, &validation)
            .map_err(|err| classify(err.kind()))?;

        data.claims.into_claim_set().ok_or(AuthError::InvalidClaims)
    }
}

pub fn check_permission(claims: &ClaimSet, permission: &str) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::PermissionsClaimMissing)?;

    if granted.contains(permission) {
        Ok(())
    } else {
        Err(AuthError::InsufficientPermission)
    }
}

// Three non-empty base64url segments. Rejects unsigned (`a.b.`) tokens up front.
fn is_compact_jws(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::ImmatureSignature
        | ErrorKind::InvalidClaimFormat(_)
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::MalformedToken,
        // InvalidSignature, InvalidAlgorithm, key/crypto failures. Fail closed.
        _ => AuthError::InvalidSignature,
    }
}
