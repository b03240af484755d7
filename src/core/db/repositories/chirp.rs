//! Chirp repository for database operations

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::Chirp;

/// Chirp repository error types
#[derive(Debug, thiserror::Error)]
pub enum ChirpRepositoryError {
    #[error("Chirp not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Chirp repository for database operations
#[derive(Clone)]
pub struct ChirpRepository {
    pool: PgPool,
}

impl ChirpRepository {
    /// Create a new chirp repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new chirp; `body` must already be validated and filtered
    pub async fn create(&self, user_id: Uuid, body: &str) -> Result<Chirp, ChirpRepositoryError> {
        let chirp = sqlx::query_as::<_, Chirp>(
            r#"
            INSERT INTO chirps (body, user_id)
            VALUES ($1, $2)
            RETURNING id, created_at, updated_at, body, user_id
            "#,
        )
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(chirp)
    }

    /// List all chirps, oldest first
    pub async fn list_all(&self) -> Result<Vec<Chirp>, ChirpRepositoryError> {
        let chirps = sqlx::query_as::<_, Chirp>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM chirps
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(chirps)
    }

    /// Find a chirp by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Chirp>, ChirpRepositoryError> {
        let chirp = sqlx::query_as::<_, Chirp>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(chirp)
    }

    /// Delete a chirp by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool, ChirpRepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chirp_repository_error_display() {
        let err = ChirpRepositoryError::NotFound;
        assert_eq!(format!("{}", err), "Chirp not found");
    }

    // ========================================================================
    // Integration Tests (require database)
    // ========================================================================

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_create_and_fetch_chirp() {
        let (pool, user_id) = setup_test_user().await;
        let repo = ChirpRepository::new(pool);

        let chirp = repo.create(user_id, "I'm the one who knocks!").await.unwrap();
        assert_eq!(chirp.user_id, user_id);
        assert_eq!(chirp.body, "I'm the one who knocks!");

        let found = repo.find_by_id(chirp.id).await.unwrap();
        assert_eq!(found.unwrap().id, chirp.id);
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_list_all_is_oldest_first() {
        let (pool, user_id) = setup_test_user().await;
        let repo = ChirpRepository::new(pool);

        let first = repo.create(user_id, "first").await.unwrap();
        let second = repo.create(user_id, "second").await.unwrap();

        let chirps = repo.list_all().await.unwrap();
        let pos_first = chirps.iter().position(|c| c.id == first.id).unwrap();
        let pos_second = chirps.iter().position(|c| c.id == second.id).unwrap();

        assert!(pos_first < pos_second);
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_delete_chirp() {
        let (pool, user_id) = setup_test_user().await;
        let repo = ChirpRepository::new(pool);

        let chirp = repo.create(user_id, "soon gone").await.unwrap();

        let deleted = repo.delete(chirp.id).await.unwrap();
        assert!(deleted);

        let found = repo.find_by_id(chirp.id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_delete_nonexistent_chirp() {
        let (pool, _user_id) = setup_test_user().await;
        let repo = ChirpRepository::new(pool);

        let deleted = repo.delete(Uuid::new_v4()).await.unwrap();
        assert!(!deleted);
    }

    // Helper functions for integration tests
    async fn setup_test_user() -> (PgPool, Uuid) {
        use crate::core::db::pool::{DbConfig, create_pool};

        let config = DbConfig::from_env().expect("DATABASE_URL must be set for tests");
        let pool = create_pool(&config)
            .await
            .expect("Failed to create test pool");

        let user_id = Uuid::new_v4();
        let email = format!("chirp_test_{}@example.com", user_id);

        sqlx::query(
            r#"
            INSERT INTO users (id, email, hashed_password)
            VALUES ($1, $2, 'test_hash')
            "#,
        )
        .bind(user_id)
        .bind(&email)
        .execute(&pool)
        .await
        .expect("Failed to create test user");

        (pool, user_id)
    }
}
