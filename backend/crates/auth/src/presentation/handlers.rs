//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use platform::cookie::{delete_cookie_header, set_cookie_header};
use platform::request::ValidatedJson;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, ListUsersUseCase, LoginInput, LoginUseCase,
    issue_session_token,
};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, MessageResponse, UserListResponse, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers and the auth guard
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// Manual impl: only the Arcs are cloned, `R` itself need not be Clone.
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Session cookie carrying a freshly signed token for `user`
fn session_cookie(config: &AuthConfig, user: &User) -> AuthResult<axum::http::HeaderValue> {
    let token = issue_session_token(config, user)?;
    Ok(set_cookie_header(&config.cookie(), &token))
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /api/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = set_cookie_header(&state.config.cookie(), &output.token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

/// POST /api/logout
///
/// Sessions are stateless, so this only clears the cookie and never fails.
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Send + Sync + 'static,
{
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, delete_cookie_header(&state.config.cookie()))],
    )
}

// ============================================================================
// Session
// ============================================================================

/// GET /api/protected
///
/// Liveness check for the session; slides the cookie expiry forward.
pub async fn protected<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let cookie = session_cookie(&state.config, &user)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse { message: "OK" }),
    ))
}

/// GET /api/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// POST /api/me/password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(
            &user.user_id,
            ChangePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    let cookie = session_cookie(&state.config, &user)?;

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/app-users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<UserListResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let users = ListUsersUseCase::new(state.repo.clone()).execute().await?;
    let docs: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

    Ok(Json(UserListResponse {
        total_docs: docs.len(),
        docs,
    }))
}
