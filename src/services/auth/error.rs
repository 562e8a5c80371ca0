use axum::http::StatusCode;
use thiserror::Error;

/// Every way an authorization attempt can be refused.
///
/// Each variant is terminal for the request. `code()` and `status()` are the
/// stable contract consumed by the error-response mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authorization header is expected")]
    MissingAuthHeader,
    #[error("authorization header must be in the form 'Bearer <token>'")]
    InvalidHeaderFormat,
    #[error("unable to parse authentication token")]
    MalformedToken,
    #[error("unable to find the appropriate signing key")]
    UnknownSigningKey,
    #[error("token signature verification failed")]
    InvalidSignature,
    #[error("token expired")]
    TokenExpired,
    #[error("incorrect claims, please check the audience and issuer")]
    InvalidClaims,
    #[error("permissions not included in token")]
    PermissionsClaimMissing,
    #[error("permission not granted")]
    InsufficientPermission,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingAuthHeader => "MISSING_AUTH_HEADER",
            Self::InvalidHeaderFormat => "INVALID_HEADER_FORMAT",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::UnknownSigningKey => "UNKNOWN_SIGNING_KEY",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidClaims => "INVALID_CLAIMS",
            Self::PermissionsClaimMissing => "PERMISSIONS_CLAIM_MISSING",
            Self::InsufficientPermission => "INSUFFICIENT_PERMISSION",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            // Token-shape problem, not a privilege problem.
            Self::PermissionsClaimMissing => StatusCode::BAD_REQUEST,
            Self::InsufficientPermission => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
