//! `Authorization: Bearer <token>` extraction.

use axum::http::{HeaderMap, header};

use super::error::AuthError;

/// Pull the raw token out of the request headers.
///
/// The value must be exactly two single-space-separated parts, the first
/// being `Bearer` (any case) and the second non-empty.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let mut values = headers.get_all(header::AUTHORIZATION).iter();
    let value = values.next().ok_or(AuthError::MissingAuthHeader)?;

    // Ambiguous credentials: refuse rather than pick one.
    if values.next().is_some() {
        return Err(AuthError::InvalidHeaderFormat);
    }

    let raw = value.to_str().map_err(|_| AuthError::InvalidHeaderFormat)?;

    let mut parts = raw.split(' ');
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::InvalidHeaderFormat);
    };

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::InvalidHeaderFormat);
    }

    Ok(token)
}
