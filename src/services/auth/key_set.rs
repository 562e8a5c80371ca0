//! Signing key set (JWKS) model and the lookup seam used by the guard.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::jwk::{
    AlgorithmParameters, EllipticCurve, Jwk, JwkSet, KeyAlgorithm, PublicKeyUse,
};
use jsonwebtoken::{Algorithm, DecodingKey};
use thiserror::Error;
use tokio::sync::RwLock;

/// Key-set retrieval failures. The guard reports all of them as
/// `UnknownSigningKey` (fail closed).
#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("jwks request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("jwks endpoint returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("jwks document is invalid: {0}")]
    InvalidDocument(String),
    #[error("jwks fetch suppressed after a recent failure")]
    RecentFailure,
}

/// One usable public key, with the algorithm it is pinned to.
///
/// The algorithm comes from the provider's key metadata, never from the
/// token header.
#[derive(Clone)]
pub struct VerificationKey {
    pub kid: String,
    pub algorithm: Algorithm,
    pub decoding_key: DecodingKey,
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("VerificationKey")
            .field("kid", &self.kid)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Immutable `kid -> key` map. Refreshing means building a new one and
/// swapping it in whole.
#[derive(Debug, Clone, Default)]
pub struct SigningKeySet {
    keys: HashMap<String, Arc<VerificationKey>>,
}

impl SigningKeySet {
    /// Keep only keys that can verify signatures with an asymmetric algorithm.
    pub fn from_jwk_set(jwks: &JwkSet) -> Self {
        let keys = jwks
            .keys
            .iter()
            .filter_map(verification_key)
            .map(|key| (key.kid.clone(), Arc::new(key)))
            .collect();

        Self { keys }
    }

    pub fn from_json(document: &[u8]) -> Result<Self, KeySetError> {
        let jwks: JwkSet = serde_json::from_slice(document)
            .map_err(|e| KeySetError::InvalidDocument(e.to_string()))?;
        Ok(Self::from_jwk_set(&jwks))
    }

    pub fn get(&self, kid: &str) -> Option<Arc<VerificationKey>> {
        self.keys.get(kid).cloned()
    }

    pub fn contains(&self, kid: &str) -> bool {
        self.keys.contains_key(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// "Given a key identifier, return matching key material or nothing."
///
/// The returned `Arc` is a complete key; a concurrent refresh can never hand
/// a caller half of an old key and half of a new one.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    async fn find(&self, kid: &str) -> Result<Option<Arc<VerificationKey>>, KeySetError>;
}

/// In-process key set (tests, locally configured keys).
#[derive(Debug, Default)]
pub struct StaticKeySet {
    current: RwLock<Arc<SigningKeySet>>,
}

impl StaticKeySet {
    pub fn new(keys: SigningKeySet) -> Self {
        Self {
            current: RwLock::new(Arc::new(keys)),
        }
    }

    /// Atomically swap the whole key set.
    pub async fn replace(&self, keys: SigningKeySet) {
        *self.current.write().await = Arc::new(keys);
    }

    pub async fn snapshot(&self) -> Arc<SigningKeySet> {
        self.current.read().await.clone()
    }
}

#[async_trait]
impl KeyProvider for StaticKeySet {
    async fn find(&self, kid: &str) -> Result<Option<Arc<VerificationKey>>, KeySetError> {
        Ok(self.snapshot().await.get(kid))
    }
}

fn verification_key(jwk: &Jwk) -> Option<VerificationKey> {
    let Some(kid) = jwk.common.key_id.clone() else {
        tracing::debug!("skipping jwk without kid");
        return None;
    };

    if matches!(jwk.common.public_key_use, Some(PublicKeyUse::Encryption)) {
        tracing::debug!(kid = %kid, "skipping encryption jwk");
        return None;
    }

    let Some(algorithm) = pinned_algorithm(jwk) else {
        tracing::debug!(kid = %kid, "skipping jwk without a usable signing algorithm");
        return None;
    };

    let decoding_key = match DecodingKey::from_jwk(jwk) {
        Ok(key) => key,
        Err(err) => {
            tracing::debug!(kid = %kid, error = %err, "skipping undecodable jwk");
            return None;
        }
    };

    Some(VerificationKey {
        kid,
        algorithm,
        decoding_key,
    })
}

fn pinned_algorithm(jwk: &Jwk) -> Option<Algorithm> {
    // Symmetric keys never verify provider-issued tokens.
    if matches!(jwk.algorithm, AlgorithmParameters::OctetKey(_)) {
        return None;
    }

    match &jwk.common.key_algorithm {
        Some(declared) => {
            let algorithm = signing_algorithm(declared)?;
            fits_key_type(algorithm, &jwk.algorithm).then_some(algorithm)
        }
        None => default_algorithm(&jwk.algorithm),
    }
}

fn signing_algorithm(declared: &KeyAlgorithm) -> Option<Algorithm> {
    match declared {
        KeyAlgorithm::RS256 => Some(Algorithm::RS256),
        KeyAlgorithm::RS384 => Some(Algorithm::RS384),
        KeyAlgorithm::RS512 => Some(Algorithm::RS512),
        KeyAlgorithm::PS256 => Some(Algorithm::PS256),
        KeyAlgorithm::PS384 => Some(Algorithm::PS384),
        KeyAlgorithm::PS512 => Some(Algorithm::PS512),
        KeyAlgorithm::ES256 => Some(Algorithm::ES256),
        KeyAlgorithm::ES384 => Some(Algorithm::ES384),
        KeyAlgorithm::EdDSA => Some(Algorithm::EdDSA),
        // HMAC and key-encryption algorithms.
        _ => None,
    }
}

fn fits_key_type(algorithm: Algorithm, params: &AlgorithmParameters) -> bool {
    match params {
        AlgorithmParameters::RSA(_) => matches!(
            algorithm,
            Algorithm::RS256
                | Algorithm::RS384
                | Algorithm::RS512
                | Algorithm::PS256
                | Algorithm::PS384
                | Algorithm::PS512
        ),
        AlgorithmParameters::EllipticCurve(ec) => matches!(
            (algorithm, &ec.curve),
            (Algorithm::ES256, EllipticCurve::P256) | (Algorithm::ES384, EllipticCurve::P384)
        ),
        AlgorithmParameters::OctetKeyPair(okp) => {
            algorithm == Algorithm::EdDSA && matches!(okp.curve, EllipticCurve::Ed25519)
        }
        AlgorithmParameters::OctetKey(_) => false,
    }
}

fn default_algorithm(params: &AlgorithmParameters) -> Option<Algorithm> {
    match params {
        AlgorithmParameters::RSA(_) => Some(Algorithm::RS256),
        AlgorithmParameters::EllipticCurve(ec) => match ec.curve {
            EllipticCurve::P256 => Some(Algorithm::ES256),
            EllipticCurve::P384 => Some(Algorithm::ES384),
            _ => None,
        },
        AlgorithmParameters::OctetKeyPair(okp) => {
            matches!(okp.curve, EllipticCurve::Ed25519).then_some(Algorithm::EdDSA)
        }
        AlgorithmParameters::OctetKey(_) => None,
    }
}
