//! Auth API endpoints
//!
//! Provides REST API endpoints for session management:
//! - POST /api/login - Verify credentials and open a session
//! - POST /api/refresh - Mint a new access token from a refresh token
//! - POST /api/revoke - Revoke a refresh token

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::auth::{AuthError, AuthService, LoginResponse};

/// Auth API state containing the session authority
#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: AuthService,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Convert AuthError to API response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthError::MissingCredential => (StatusCode::UNAUTHORIZED, "MISSING_CREDENTIAL"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            AuthError::SessionInvalid => (StatusCode::UNAUTHORIZED, "REFRESH_TOKEN_INVALID"),
            AuthError::SessionNotFound => (StatusCode::NOT_FOUND, "REFRESH_TOKEN_NOT_FOUND"),
            AuthError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "INVALID_API_KEY"),
            AuthError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ApiError::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

/// Login request data
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for token refresh
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Create the auth API router
pub fn auth_api_router(state: AuthApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/login", post(login_handler))
        .route("/api/refresh", post(refresh_handler))
        .route("/api/revoke", post(revoke_handler))
        .with_state(state)
}

/// POST /api/login
/// Verify credentials, issue an access/refresh token pair
async fn login_handler(
    State(state): State<Arc<AuthApiState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    tracing::info!("Login attempt for email: {}", request.email);

    let response = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    tracing::info!("User logged in successfully: {}", response.user.email);

    Ok(Json(response))
}

/// POST /api/refresh
/// Mint a new access token from the bearer refresh token
async fn refresh_handler(
    State(state): State<Arc<AuthApiState>>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AuthError> {
    tracing::debug!("Token refresh request");

    let token = state.auth_service.refresh(&headers).await?;

    Ok(Json(RefreshResponse { token }))
}

/// POST /api/revoke
/// Revoke the bearer refresh token
async fn revoke_handler(
    State(state): State<Arc<AuthApiState>>,
    headers: HeaderMap,
) -> Result<StatusCode, AuthError> {
    tracing::debug!("Token revoke request");

    state.auth_service.revoke(&headers).await?;

    Ok(StatusCode::NO_CONTENT)
}
