//! Session authority
//!
//! Orchestrates credential verification and token issuance: password login,
//! bearer-token authentication, refresh-token renewal and revocation, and
//! the API-key check for trusted service callers. Holds no mutable state;
//! the signing secret and API key are fixed at construction.

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::core::auth::headers::{self, HeaderCredentialError};
use crate::core::auth::jwt::{JwtError, JwtService};
use crate::core::auth::password::{self, PasswordError};
use crate::core::auth::refresh::generate_refresh_token;
use crate::core::db::models::UserResponse;
use crate::core::db::repositories::{
    RefreshTokenRepository, RefreshTokenRepositoryError, UserRepository, UserRepositoryError,
};

/// Refresh token lifetime (60 days)
const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email and wrong password collapse into this one class so a
    /// caller cannot probe which accounts exist.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Authorization credential is missing or malformed")]
    MissingCredential,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Refresh token not found or no longer valid")]
    SessionInvalid,

    #[error("Refresh token not found")]
    SessionNotFound,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<HeaderCredentialError> for AuthError {
    fn from(_: HeaderCredentialError) -> Self {
        AuthError::MissingCredential
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::TokenExpired,
            JwtError::InvalidToken
            | JwtError::InvalidIssuer
            | JwtError::MalformedSubject
            | JwtError::DecodingError(_) => AuthError::InvalidToken,
            JwtError::EncodingError(e) => AuthError::InternalError(e),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::InternalError(err.to_string())
    }
}

impl From<UserRepositoryError> for AuthError {
    fn from(err: UserRepositoryError) -> Self {
        AuthError::InternalError(err.to_string())
    }
}

impl From<RefreshTokenRepositoryError> for AuthError {
    fn from(err: RefreshTokenRepositoryError) -> Self {
        AuthError::InternalError(err.to_string())
    }
}

/// Successful login: public user fields plus both tokens.
///
/// The user fields are flattened so the wire shape is
/// `{id, created_at, updated_at, email, is_chirpy_red, token, refresh_token}`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

/// Session authority over the user and refresh-token repositories
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    refresh_repo: RefreshTokenRepository,
    jwt: JwtService,
    polka_key: String,
}

impl AuthService {
    /// Create a new session authority
    pub fn new(
        user_repo: UserRepository,
        refresh_repo: RefreshTokenRepository,
        jwt: JwtService,
        polka_key: impl Into<String>,
    ) -> Self {
        Self {
            user_repo,
            refresh_repo,
            jwt,
            polka_key: polka_key.into(),
        }
    }

    /// Verify an email/password pair and open a session.
    ///
    /// Issues a 1-hour access token and a 60-day refresh token; the refresh
    /// record is persisted before either token is returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(password, &user.hashed_password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt.issue(user.id)?;
        let refresh_token = generate_refresh_token();
        let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);

        self.refresh_repo
            .create(&refresh_token, user.id, expires_at)
            .await?;

        Ok(LoginResponse {
            user: user.into(),
            token,
            refresh_token,
        })
    }

    /// Resolve the user asserted by a request's bearer access token
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Uuid, AuthError> {
        let token = headers::bearer_token(headers)?;
        Ok(self.jwt.verify(&token)?)
    }

    /// Mint a new access token from a bearer refresh token.
    ///
    /// The record must exist, be unrevoked, and be unexpired; the refresh
    /// token itself is not rotated.
    pub async fn refresh(&self, headers: &HeaderMap) -> Result<String, AuthError> {
        let token = headers::bearer_token(headers)?;

        let record = self
            .refresh_repo
            .find_by_token(&token)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        let now = Utc::now();
        if record.revoked_at.is_some() || record.expires_at <= now {
            return Err(AuthError::SessionInvalid);
        }

        Ok(self.jwt.issue(record.user_id)?)
    }

    /// Revoke a bearer refresh token. Revoking an already-revoked token
    /// succeeds; a token with no record is an error.
    pub async fn revoke(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let token = headers::bearer_token(headers)?;

        if !self.refresh_repo.revoke(&token).await? {
            return Err(AuthError::SessionNotFound);
        }

        Ok(())
    }

    /// Validate the `ApiKey` credential of a trusted service caller
    pub fn authorize_api_key(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let key = headers::api_key(headers)?;

        if key != self.polka_key {
            return Err(AuthError::InvalidApiKey);
        }

        Ok(())
    }
}
