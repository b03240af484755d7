//! Access token codec
//!
//! Creates and verifies the short-lived signed tokens (HS256) that assert a
//! user identity. Tokens are stateless: validity is purely a matter of
//! signature, issuer, and expiry. The issuer claim pins the token class so
//! that no other token type signed with the same secret is accepted.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim identifying this token class
pub const TOKEN_ISSUER: &str = "chirpy-access";

/// Default access token lifetime (1 hour)
const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// Access token errors
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingError(String),

    #[error("Token decoding failed: {0}")]
    DecodingError(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid issuer")]
    InvalidIssuer,

    #[error("Token subject is not a valid user ID")]
    MalformedSubject,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            ErrorKind::InvalidToken | ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                JwtError::InvalidToken
            }
            _ => JwtError::DecodingError(err.to_string()),
        }
    }
}

/// Access token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer; always [`TOKEN_ISSUER`]
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Subject (user ID)
    pub sub: String,
}

/// Signs and verifies access tokens with a symmetric secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl JwtService {
    /// Create a new codec keyed by `secret`, with the default 1-hour TTL
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: DEFAULT_ACCESS_TOKEN_TTL_SECS,
        }
    }

    /// Set the access token lifetime in seconds
    pub fn access_token_ttl(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    /// Issue a signed access token for `user_id`
    pub fn issue(&self, user_id: Uuid) -> Result<String, JwtError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ttl_seconds);

        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            sub: user_id.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Verify a token and return the user ID it asserts.
    ///
    /// Rejects a bad signature, a past expiry, an issuer other than
    /// [`TOKEN_ISSUER`], and a subject that does not parse as a UUID.
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[TOKEN_ISSUER]);
        // Strict expiration checking
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Uuid::parse_str(&token_data.claims.sub).map_err(|_| JwtError::MalformedSubject)
    }
}
