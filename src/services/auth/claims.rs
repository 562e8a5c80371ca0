use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `aud` may be a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Self::Single(aud) => aud == audience,
            Self::Many(auds) => auds.iter().any(|aud| aud == audience),
        }
    }
}

/// Payload of a verified access token.
///
/// Only ever constructed after signature, `iss`, `aud` and `exp` checks pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimSet {
    pub iss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub aud: Audience,
    pub exp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeSet<String>>,

    // Everything else the provider put in the token (azp, scope, gty, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClaimSet {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|granted| granted.contains(permission))
    }
}

/// Wire shape handed to `jsonwebtoken::decode`.
///
/// `jsonwebtoken` deserializes the payload before validating it, so the
/// required claims are optional here: their absence must surface as a claim
/// failure, not a parse failure. `permissions` stays a raw `Value` and is
/// narrowed in `into_claim_set`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    aud: Option<Audience>,
    #[serde(default, deserialize_with = "numeric_date")]
    exp: Option<u64>,
    #[serde(default, deserialize_with = "numeric_date")]
    iat: Option<u64>,
    #[serde(default)]
    permissions: Option<Value>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RawClaims {
    /// `None` when a required claim is missing.
    pub(crate) fn into_claim_set(self) -> Option<ClaimSet> {
        Some(ClaimSet {
            iss: self.iss?,
            sub: self.sub,
            aud: self.aud?,
            exp: self.exp?,
            iat: self.iat,
            permissions: self.permissions.and_then(permission_set),
            extra: self.extra,
        })
    }
}

// NumericDate may carry a fraction; it is truncated to whole seconds.
// Non-numeric values read as absent and fail claim validation.
fn numeric_date<'de, D>(de: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;

    Ok(value.as_ref().and_then(|v| {
        v.as_u64().or_else(|| {
            v.as_f64()
                .filter(|secs| secs.is_finite() && *secs >= 0.0 && *secs < u64::MAX as f64)
                .map(|secs| secs.trunc() as u64)
        })
    }))
}

// Anything other than an array of strings counts as "no permissions claim".
fn permission_set(value: Value) -> Option<BTreeSet<String>> {
    let Value::Array(items) = value else {
        return None;
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}
