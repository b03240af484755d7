//! User API endpoints
//!
//! Provides REST API endpoints for user accounts:
//! - POST /api/users - Register a new user
//! - PUT /api/users - Update the authenticated user's email and password

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{post, put},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::core::auth::{ApiError, AuthError, AuthService, hash_password};
use crate::core::db::models::UserResponse;
use crate::core::db::repositories::{UserRepository, UserRepositoryError};

/// User API state containing the user repository and session authority
#[derive(Clone)]
pub struct UserApiState {
    pub user_repo: UserRepository,
    pub auth_service: AuthService,
}

/// User API error types
#[derive(Debug, thiserror::Error)]
pub enum UserApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("User not found")]
    NotFound,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<UserRepositoryError> for UserApiError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound => UserApiError::NotFound,
            UserRepositoryError::EmailAlreadyExists => UserApiError::EmailAlreadyExists,
            UserRepositoryError::DatabaseError(e) => UserApiError::InternalError(e.to_string()),
        }
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, code) = match self {
            // Auth failures use the auth module's status mapping
            UserApiError::Auth(err) => return err.into_response(),
            UserApiError::EmailAlreadyExists => (StatusCode::CONFLICT, "EMAIL_EXISTS"),
            UserApiError::NotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            UserApiError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        (status, Json(ApiError::new(message, code))).into_response()
    }
}

/// Request for creating or updating a user
#[derive(Debug, Clone, Deserialize)]
pub struct UserCredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Create the user API router
pub fn user_api_router(state: UserApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/users", post(create_user_handler))
        .route("/api/users", put(update_user_handler))
        .with_state(state)
}

/// POST /api/users
/// Register a new user
async fn create_user_handler(
    State(state): State<Arc<UserApiState>>,
    Json(request): Json<UserCredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), UserApiError> {
    tracing::info!("Registration attempt for email: {}", request.email);

    let hashed_password =
        hash_password(&request.password).map_err(|e| UserApiError::InternalError(e.to_string()))?;

    let user = state.user_repo.create(&request.email, &hashed_password).await?;

    tracing::info!("User registered successfully: {}", user.email);

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users
/// Update the authenticated user's email and password
async fn update_user_handler(
    State(state): State<Arc<UserApiState>>,
    headers: HeaderMap,
    Json(request): Json<UserCredentialsRequest>,
) -> Result<Json<UserResponse>, UserApiError> {
    let user_id = state.auth_service.authenticate(&headers)?;

    let hashed_password =
        hash_password(&request.password).map_err(|e| UserApiError::InternalError(e.to_string()))?;

    let user = state
        .user_repo
        .update_credentials(user_id, &request.email, &hashed_password)
        .await?;

    tracing::info!("Credentials updated for user: {}", user_id);

    Ok(Json(user.into()))
}
