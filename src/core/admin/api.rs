//! Admin API endpoints
//!
//! Provides operational endpoints:
//! - GET /admin/metrics - Fileserver hit count as an HTML page
//! - POST /admin/reset - Reset hits and delete all users (dev platform only)
//!
//! The hit counter lives in this module's state and is bumped by the
//! [`track_hits`] middleware wrapped around the static fileserver.

use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::core::auth::ApiError;
use crate::core::db::repositories::{UserRepository, UserRepositoryError};

/// Admin API state: hit counter, user repository, platform gate
#[derive(Clone)]
pub struct AdminApiState {
    pub hits: Arc<AtomicI64>,
    pub user_repo: UserRepository,
    /// Whether destructive operations are allowed (PLATFORM=dev)
    pub dev_platform: bool,
}

/// Admin API error types
#[derive(Debug, thiserror::Error)]
pub enum AdminApiError {
    #[error("Reset is only allowed in dev environment.")]
    Forbidden,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<UserRepositoryError> for AdminApiError {
    fn from(err: UserRepositoryError) -> Self {
        AdminApiError::InternalError(err.to_string())
    }
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AdminApiError::Forbidden => (StatusCode::FORBIDDEN, "RESET_FORBIDDEN"),
            AdminApiError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiError::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

/// Create the admin API router
pub fn admin_api_router(state: AdminApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/admin/metrics", get(metrics_handler))
        .route("/admin/reset", post(reset_handler))
        .with_state(state)
}

/// Middleware counting every request passing through it
pub async fn track_hits(
    State(hits): State<Arc<AtomicI64>>,
    request: Request,
    next: Next,
) -> Response {
    hits.fetch_add(1, Ordering::Relaxed);
    next.run(request).await
}

/// GET /admin/metrics
/// Show the fileserver hit count
async fn metrics_handler(State(state): State<Arc<AdminApiState>>) -> Html<String> {
    let hits = state.hits.load(Ordering::Relaxed);

    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {hits} times!</p>
  </body>
</html>"#
    ))
}

/// POST /admin/reset
/// Reset the hit counter and delete all users
async fn reset_handler(
    State(state): State<Arc<AdminApiState>>,
) -> Result<&'static str, AdminApiError> {
    if !state.dev_platform {
        return Err(AdminApiError::Forbidden);
    }

    state.hits.store(0, Ordering::Relaxed);
    let deleted = state.user_repo.delete_all().await?;

    tracing::warn!("Admin reset: deleted {} users", deleted);

    Ok("Hits reset to 0 and database reset to initial state.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn test_state(dev_platform: bool) -> AdminApiState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:5432/chirpy_test")
            .expect("lazy pool");

        AdminApiState {
            hits: Arc::new(AtomicI64::new(0)),
            user_repo: UserRepository::new(pool),
            dev_platform,
        }
    }

    #[test]
    fn test_forbidden_status() {
        let response = AdminApiError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_metrics_reports_hits() {
        let state = test_state(true);
        state.hits.store(17, Ordering::Relaxed);

        let Html(page) = metrics_handler(State(Arc::new(state))).await;

        assert!(page.contains("Welcome, Chirpy Admin"));
        assert!(page.contains("visited 17 times"));
    }

    #[tokio::test]
    async fn test_reset_rejected_outside_dev() {
        let state = test_state(false);
        state.hits.store(5, Ordering::Relaxed);
        let state = Arc::new(state);

        let result = reset_handler(State(state.clone())).await;

        assert!(matches!(result, Err(AdminApiError::Forbidden)));
        // Counter untouched on refusal
        assert_eq!(state.hits.load(Ordering::Relaxed), 5);
    }
}
