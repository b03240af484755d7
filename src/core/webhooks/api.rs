//! Webhook API endpoints
//!
//! Provides the inbound endpoint for the Polka payment provider:
//! - POST /api/polka/webhooks - ApiKey-authorized subscription events

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::auth::{ApiError, AuthError, AuthService};
use crate::core::db::repositories::{UserRepository, UserRepositoryError};

/// Event name that upgrades a user to Chirpy Red
const EVENT_USER_UPGRADED: &str = "user.upgraded";

/// Webhook API state containing the user repository and session authority
#[derive(Clone)]
pub struct WebhookApiState {
    pub user_repo: UserRepository,
    pub auth_service: AuthService,
}

/// Webhook API error types
#[derive(Debug, thiserror::Error)]
pub enum WebhookApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<UserRepositoryError> for WebhookApiError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound => WebhookApiError::UserNotFound,
            other => WebhookApiError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, code) = match self {
            // Auth failures use the auth module's status mapping
            WebhookApiError::Auth(err) => return err.into_response(),
            WebhookApiError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            WebhookApiError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        (status, Json(ApiError::new(message, code))).into_response()
    }
}

/// Webhook event payload
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    pub data: WebhookData,
}

/// Webhook event data
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookData {
    pub user_id: Uuid,
}

/// Create the webhook API router
pub fn webhook_api_router(state: WebhookApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/polka/webhooks", post(polka_webhook_handler))
        .with_state(state)
}

/// POST /api/polka/webhooks
/// Handle subscription events from Polka
async fn polka_webhook_handler(
    State(state): State<Arc<WebhookApiState>>,
    headers: HeaderMap,
    Json(request): Json<WebhookRequest>,
) -> Result<StatusCode, WebhookApiError> {
    // Unrecognized events are acknowledged without further processing
    if request.event != EVENT_USER_UPGRADED {
        return Ok(StatusCode::NO_CONTENT);
    }

    state.auth_service.authorize_api_key(&headers)?;

    let upgraded = state
        .user_repo
        .upgrade_to_chirpy_red(request.data.user_id)
        .await?;

    if !upgraded {
        return Err(WebhookApiError::UserNotFound);
    }

    tracing::info!("User {} upgraded to Chirpy Red", request.data.user_id);

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_request_deserialization() {
        let json = r#"{
            "event": "user.upgraded",
            "data": {
                "user_id": "3311741c-680c-4546-99f3-fc9efac2036c"
            }
        }"#;

        let request: WebhookRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.event, "user.upgraded");
        assert_eq!(
            request.data.user_id.to_string(),
            "3311741c-680c-4546-99f3-fc9efac2036c"
        );
    }

    #[test]
    fn test_webhook_request_rejects_malformed_user_id() {
        let json = r#"{
            "event": "user.upgraded",
            "data": {
                "user_id": "not-a-uuid"
            }
        }"#;

        let result: Result<WebhookRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_webhook_error_status_codes() {
        let response = WebhookApiError::UserNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = WebhookApiError::Auth(AuthError::InvalidApiKey).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
