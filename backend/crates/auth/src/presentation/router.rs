//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_routes(AuthAppState::new(repo, config))
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    auth_routes(AuthAppState::new(repo, config))
}

/// Auth routes over an existing state, so the same state can also guard
/// routes owned by other crates
pub fn auth_routes<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/protected", get(handlers::protected::<R>))
        .route("/me", get(handlers::me))
        .route("/me/password", post(handlers::change_password::<R>))
        .route("/app-users", get(handlers::list_users::<R>))
        .route_layer(from_fn_with_state(state.clone(), require_auth::<R>));

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .merge(protected)
        .with_state(state)
}
