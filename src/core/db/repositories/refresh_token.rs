//! Refresh token repository
//!
//! Stores the long-lived opaque refresh tokens that back session renewal.
//! Tokens are stored as SHA-256 digests; every entry point takes the raw
//! token and hashes it before touching the database. Revocation sets
//! `revoked_at` rather than deleting the row, so a revoked token stays
//! distinguishable from one that never existed.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::RefreshToken;

/// Refresh token repository error types
#[derive(Debug, thiserror::Error)]
pub enum RefreshTokenRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Refresh token repository for database operations
#[derive(Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh token repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hash a raw token using SHA-256
    pub fn hash_token(raw_token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw_token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Persist a new refresh token record bound to `user_id`
    pub async fn create(
        &self,
        raw_token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, RefreshTokenRepositoryError> {
        let token_hash = Self::hash_token(raw_token);

        let record = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token_hash, created_at, updated_at, user_id, expires_at, revoked_at
            "#,
        )
        .bind(&token_hash)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Look up a refresh token record by raw token
    pub async fn find_by_token(
        &self,
        raw_token: &str,
    ) -> Result<Option<RefreshToken>, RefreshTokenRepositoryError> {
        let token_hash = Self::hash_token(raw_token);

        let record = sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT token_hash, created_at, updated_at, user_id, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Revoke a refresh token. Returns false when no such record exists.
    ///
    /// Re-revoking keeps the original `revoked_at` and still counts as a
    /// match, so revocation is idempotent.
    pub async fn revoke(&self, raw_token: &str) -> Result<bool, RefreshTokenRepositoryError> {
        let token_hash = Self::hash_token(raw_token);

        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = COALESCE(revoked_at, NOW()), updated_at = NOW()
            WHERE token_hash = $1
            "#,
        )
        .bind(&token_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
