use std::sync::Arc;
use std::sync::atomic::AtomicI64;

use axum::{Router, middleware, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use chirpy::core::admin::{AdminApiState, admin_api_router, track_hits};
use chirpy::core::auth::{AuthApiState, AuthService, JwtService, auth_api_router};
use chirpy::core::chirps::{ChirpApiState, chirp_api_router};
use chirpy::core::config::Config;
use chirpy::core::db::pool::{DbConfig, create_pool_with_migrations};
use chirpy::core::db::repositories::{ChirpRepository, RefreshTokenRepository, UserRepository};
use chirpy::core::users::{UserApiState, user_api_router};
use chirpy::core::webhooks::{WebhookApiState, webhook_api_router};

const BIND_ADDR: &str = "0.0.0.0:8080";

/// GET /api/healthz
async fn healthz() -> &'static str {
    "OK"
}

#[tokio::main]
async fn main() {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load application config from environment variables
    let config = Config::from_env();

    // Log config status (without revealing secrets)
    tracing::info!(
        "Config loaded: database={}, token_secret={}, polka_key={}, dev={}",
        config.has_database(),
        config.has_token_secret(),
        config.has_polka_key(),
        config.is_dev()
    );

    let db_config = DbConfig::from_env().expect("DATABASE_URL must be set");
    let pool = create_pool_with_migrations(&db_config)
        .await
        .expect("Failed to connect to database");

    let user_repo = UserRepository::new(pool.clone());
    let chirp_repo = ChirpRepository::new(pool.clone());
    let refresh_repo = RefreshTokenRepository::new(pool);

    let jwt_service = JwtService::new(config.token_secret_or_panic());
    let auth_service = AuthService::new(
        user_repo.clone(),
        refresh_repo,
        jwt_service,
        config.polka_key_or_panic(),
    );

    let hits = Arc::new(AtomicI64::new(0));

    // Static fileserver at /app, every hit counted
    let fileserver = Router::new()
        .nest_service("/app", ServeDir::new("static"))
        .layer(middleware::from_fn_with_state(hits.clone(), track_hits));

    let app = Router::new()
        .route("/api/healthz", get(healthz))
        .merge(auth_api_router(AuthApiState {
            auth_service: auth_service.clone(),
        }))
        .merge(user_api_router(UserApiState {
            user_repo: user_repo.clone(),
            auth_service: auth_service.clone(),
        }))
        .merge(chirp_api_router(ChirpApiState {
            chirp_repo,
            auth_service: auth_service.clone(),
        }))
        .merge(webhook_api_router(WebhookApiState {
            user_repo: user_repo.clone(),
            auth_service,
        }))
        .merge(admin_api_router(AdminApiState {
            hits,
            user_repo,
            dev_platform: config.is_dev(),
        }))
        .merge(fileserver)
        .layer(CompressionLayer::new());

    tracing::info!("listening on http://{}", BIND_ADDR);

    let listener = tokio::net::TcpListener::bind(BIND_ADDR)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
