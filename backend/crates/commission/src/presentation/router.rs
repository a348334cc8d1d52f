//! Commission Router
//!
//! Routes are unguarded here; the api binary wraps them with the auth guard.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};

use crate::application::MAX_IMPORT_BYTES;
use crate::domain::repository::{CommissionStore, UserDirectory};
use crate::infra::postgres::PgCommissionRepository;
use crate::presentation::handlers::{self, CommissionAppState};

/// Create the commission router with PostgreSQL repository
pub fn commission_router<D>(repo: PgCommissionRepository, users: D) -> Router
where
    D: UserDirectory + Send + Sync + 'static,
{
    commission_routes(CommissionAppState::new(repo, users))
}

/// Create a generic commission router for any repository implementation
pub fn commission_router_generic<R, D>(repo: R, users: D) -> Router
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    commission_routes(CommissionAppState::new(repo, users))
}

pub fn commission_routes<R, D>(state: CommissionAppState<R, D>) -> Router
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/suppliers",
            get(handlers::list_suppliers::<R, D>).post(handlers::create_supplier::<R, D>),
        )
        .route(
            "/suppliers-commissions-column",
            get(handlers::list_column_mappings::<R, D>)
                .post(handlers::create_column_mapping::<R, D>),
        )
        .route(
            "/suppliers-commissions-column/{id}",
            patch(handlers::update_column_mapping::<R, D>)
                .delete(handlers::delete_column_mapping::<R, D>),
        )
        .route(
            "/app-users-commissions-code",
            get(handlers::list_user_codes::<R, D>).post(handlers::create_user_codes::<R, D>),
        )
        .route(
            "/app-users-commissions-code/{id}",
            patch(handlers::update_user_codes::<R, D>).delete(handlers::delete_user_codes::<R, D>),
        )
        .route("/commissions", get(handlers::list_commissions::<R, D>))
        .route(
            "/commissions/commission-suppliers",
            post(handlers::create_commission::<R, D>),
        )
        .route("/commissions/{id}", get(handlers::get_commission::<R, D>))
        .route("/commission-imports", get(handlers::list_imports::<R, D>))
        .route(
            "/commission-imports/custom-create",
            post(handlers::create_import::<R, D>)
                // room for the multipart framing around the file
                .layer(DefaultBodyLimit::max(MAX_IMPORT_BYTES + 64 * 1024)),
        )
        .route(
            "/commission-imports/{id}",
            get(handlers::user_imports::<R, D>).delete(handlers::delete_import::<R, D>),
        )
        .route(
            "/commission-imports/{id}/file",
            get(handlers::download_import::<R, D>),
        )
        .with_state(state)
}
