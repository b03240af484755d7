//! Credential extraction from the Authorization header
//!
//! Two schemes are supported: `Bearer <token>` for access and refresh
//! tokens, and `ApiKey <key>` for trusted service callers.

use axum::http::{HeaderMap, header};

/// Header credential error types
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum HeaderCredentialError {
    #[error("Authorization header is missing")]
    MissingHeader,

    #[error("Authorization header does not use the expected scheme")]
    MalformedScheme,
}

/// Extract a `Bearer` token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<String, HeaderCredentialError> {
    scheme_credential(headers, "Bearer ")
}

/// Extract an `ApiKey` credential from the Authorization header
pub fn api_key(headers: &HeaderMap) -> Result<String, HeaderCredentialError> {
    scheme_credential(headers, "ApiKey ")
}

/// The credential is whatever follows the scheme prefix, verbatim.
fn scheme_credential(
    headers: &HeaderMap,
    scheme: &str,
) -> Result<String, HeaderCredentialError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(HeaderCredentialError::MissingHeader)?;

    let credential = value
        .strip_prefix(scheme)
        .ok_or(HeaderCredentialError::MalformedScheme)?;

    if credential.is_empty() {
        return Err(HeaderCredentialError::MalformedScheme);
    }

    Ok(credential.to_string())
}
