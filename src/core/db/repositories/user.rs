//! User repository for database operations

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::User;

/// User repository error types
#[derive(Debug, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User not found")]
    NotFound,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user; `hashed_password` must already be hashed
    pub async fn create(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, UserRepositoryError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(UserRepositoryError::EmailAlreadyExists);
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES ($1, $2)
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Replace a user's email and password hash
    pub async fn update_credentials(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, hashed_password = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(hashed_password)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(UserRepositoryError::NotFound)
    }

    /// Mark a user as a Chirpy Red subscriber
    pub async fn upgrade_to_chirpy_red(&self, id: Uuid) -> Result<bool, UserRepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_chirpy_red = TRUE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete all users (admin reset; chirps and refresh tokens cascade)
    pub async fn delete_all(&self) -> Result<u64, UserRepositoryError> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Error Type Tests
    // ========================================================================

    #[test]
    fn test_user_repository_error_display() {
        let err = UserRepositoryError::NotFound;
        assert_eq!(format!("{}", err), "User not found");

        let err = UserRepositoryError::EmailAlreadyExists;
        assert_eq!(format!("{}", err), "Email already exists");
    }

    // ========================================================================
    // Integration Tests (require database)
    // ========================================================================

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_create_and_find_user() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let email = format!("create_{}@example.com", Uuid::new_v4());
        let user = repo.create(&email, "$2b$12$fakefakefakefake").await.unwrap();

        assert_eq!(user.email, email);
        assert!(!user.is_chirpy_red);

        let found = repo.find_by_email(&email).await.unwrap();
        assert_eq!(found.unwrap().id, user.id);
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_create_user_duplicate_email() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let email = format!("dup_{}@example.com", Uuid::new_v4());
        repo.create(&email, "hash1").await.unwrap();

        let result = repo.create(&email, "hash2").await;
        assert!(matches!(
            result,
            Err(UserRepositoryError::EmailAlreadyExists)
        ));
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_update_credentials() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let email = format!("edit_{}@example.com", Uuid::new_v4());
        let user = repo.create(&email, "old_hash").await.unwrap();

        let new_email = format!("edited_{}@example.com", Uuid::new_v4());
        let updated = repo
            .update_credentials(user.id, &new_email, "new_hash")
            .await
            .unwrap();

        assert_eq!(updated.email, new_email);
        assert_eq!(updated.hashed_password, "new_hash");
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_update_credentials_not_found() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let result = repo
            .update_credentials(Uuid::new_v4(), "ghost@example.com", "hash")
            .await;

        assert!(matches!(result, Err(UserRepositoryError::NotFound)));
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_upgrade_to_chirpy_red() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let email = format!("red_{}@example.com", Uuid::new_v4());
        let user = repo.create(&email, "hash").await.unwrap();

        let upgraded = repo.upgrade_to_chirpy_red(user.id).await.unwrap();
        assert!(upgraded);

        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(found.is_chirpy_red);
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_upgrade_unknown_user() {
        let pool = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let upgraded = repo.upgrade_to_chirpy_red(Uuid::new_v4()).await.unwrap();
        assert!(!upgraded);
    }

    // Helper function to create test pool
    async fn create_test_pool() -> PgPool {
        use crate::core::db::pool::{DbConfig, create_pool};

        let config = DbConfig::from_env().expect("DATABASE_URL must be set for tests");
        create_pool(&config)
            .await
            .expect("Failed to create test pool")
    }
}
