//! Bearer-token authorization: header extraction, JWKS-backed signature and
//! claim verification, permission checks.

pub mod bearer;
pub mod claims;
pub mod error;
pub mod factory;
pub mod guard;
pub mod jwks;
pub mod key_set;

#[cfg(test)]
pub(crate) mod test_support;

pub use claims::{Audience, ClaimSet};
pub use error::AuthError;
pub use factory::build_auth_guard;
pub use guard::AuthGuard;
pub use jwks::RemoteJwks;
pub use key_set::{KeyProvider, KeySetError, SigningKeySet, StaticKeySet, VerificationKey};
