//! Chirp API endpoints
//!
//! Provides REST API endpoints for chirps:
//! - POST /api/chirps - Post a chirp (auth required)
//! - GET /api/chirps - List all chirps, oldest first
//! - GET /api/chirps/{id} - Fetch a single chirp
//! - DELETE /api/chirps/{id} - Delete own chirp (auth required, owner only)

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::auth::{ApiError, AuthError, AuthService};
use crate::core::db::models::Chirp;
use crate::core::db::repositories::{ChirpRepository, ChirpRepositoryError};
use crate::core::moderation::clean_chirp_body;

/// Maximum chirp length in characters
const MAX_CHIRP_LENGTH: usize = 140;

/// Chirp API state containing the chirp repository and session authority
#[derive(Clone)]
pub struct ChirpApiState {
    pub chirp_repo: ChirpRepository,
    pub auth_service: AuthService,
}

/// Chirp API error types
#[derive(Debug, thiserror::Error)]
pub enum ChirpApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Chirp not found")]
    NotFound,

    #[error("Chirp is not yours")]
    NotOwner,

    #[error("Chirp is too long")]
    TooLong,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ChirpRepositoryError> for ChirpApiError {
    fn from(err: ChirpRepositoryError) -> Self {
        match err {
            ChirpRepositoryError::NotFound => ChirpApiError::NotFound,
            ChirpRepositoryError::DatabaseError(e) => ChirpApiError::InternalError(e.to_string()),
        }
    }
}

impl IntoResponse for ChirpApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, code) = match self {
            // Auth failures use the auth module's status mapping
            ChirpApiError::Auth(err) => return err.into_response(),
            ChirpApiError::NotFound => (StatusCode::NOT_FOUND, "CHIRP_NOT_FOUND"),
            ChirpApiError::NotOwner => (StatusCode::FORBIDDEN, "NOT_CHIRP_OWNER"),
            ChirpApiError::TooLong => (StatusCode::BAD_REQUEST, "CHIRP_TOO_LONG"),
            ChirpApiError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        (status, Json(ApiError::new(message, code))).into_response()
    }
}

/// Request for posting a chirp
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// Create the chirp API router
pub fn chirp_api_router(state: ChirpApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/chirps", post(create_chirp_handler))
        .route("/api/chirps", get(list_chirps_handler))
        .route("/api/chirps/{id}", get(get_chirp_handler))
        .route("/api/chirps/{id}", delete(delete_chirp_handler))
        .with_state(state)
}

/// POST /api/chirps
/// Post a chirp as the authenticated user
async fn create_chirp_handler(
    State(state): State<Arc<ChirpApiState>>,
    headers: HeaderMap,
    Json(request): Json<CreateChirpRequest>,
) -> Result<(StatusCode, Json<Chirp>), ChirpApiError> {
    let user_id = state.auth_service.authenticate(&headers)?;

    if request.body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ChirpApiError::TooLong);
    }

    let body = clean_chirp_body(&request.body);
    let chirp = state.chirp_repo.create(user_id, &body).await?;

    tracing::info!("Chirp {} posted by user {}", chirp.id, user_id);

    Ok((StatusCode::CREATED, Json(chirp)))
}

/// GET /api/chirps
/// List all chirps, oldest first
async fn list_chirps_handler(
    State(state): State<Arc<ChirpApiState>>,
) -> Result<Json<Vec<Chirp>>, ChirpApiError> {
    let chirps = state.chirp_repo.list_all().await?;

    Ok(Json(chirps))
}

/// GET /api/chirps/{id}
/// Fetch a single chirp
async fn get_chirp_handler(
    State(state): State<Arc<ChirpApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Chirp>, ChirpApiError> {
    let chirp = state
        .chirp_repo
        .find_by_id(id)
        .await?
        .ok_or(ChirpApiError::NotFound)?;

    Ok(Json(chirp))
}

/// DELETE /api/chirps/{id}
/// Delete a chirp; only its author may do so
async fn delete_chirp_handler(
    State(state): State<Arc<ChirpApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ChirpApiError> {
    let user_id = state.auth_service.authenticate(&headers)?;

    let chirp = state
        .chirp_repo
        .find_by_id(id)
        .await?
        .ok_or(ChirpApiError::NotFound)?;

    if chirp.user_id != user_id {
        return Err(ChirpApiError::NotOwner);
    }

    state.chirp_repo.delete(chirp.id).await?;

    tracing::info!("Chirp {} deleted by user {}", chirp.id, user_id);

    Ok(StatusCode::NO_CONTENT)
}
