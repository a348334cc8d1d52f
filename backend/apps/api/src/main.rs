//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod directory;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::PgUserRepository;
use auth::application::SeedUserUseCase;
use auth::handlers::AuthAppState;
use auth::middleware::require_auth;
use auth::router::auth_routes;
use axum::{
    Router, http,
    http::{Method, header},
    middleware::from_fn_with_state,
};
use commission::{PgCommissionRepository, commission_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::directory::AuthUserDirectory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,commission=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Make sure a first account exists (the use case logs the outcome)
    let seed = SeedUserUseCase::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(config.auth.clone()),
    );
    seed.execute(&config.seed_email, config.seed_password.clone())
        .await
        .map_err(|e| anyhow::anyhow!("seed user creation failed: {e}"))?;

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let auth_state = AuthAppState::new(PgUserRepository::new(pool.clone()), config.auth.clone());

    let commissions = commission_router(
        PgCommissionRepository::new(pool.clone()),
        AuthUserDirectory::new(pool.clone()),
    )
    .route_layer(from_fn_with_state(
        auth_state.clone(),
        require_auth::<PgUserRepository>,
    ));

    let app = Router::new()
        .nest("/api", auth_routes(auth_state).merge(commissions))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
