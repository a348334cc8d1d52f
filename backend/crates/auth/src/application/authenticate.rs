//! Authenticate Use Case
//!
//! Resolves a session token to its user:
//! `unauthenticated -> token-verified -> user-resolved`.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{session::SessionClaims, user::User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, token: Option<&str>) -> AuthResult<User> {
        let token = token.ok_or(AuthError::MissingToken)?;

        let claims: SessionClaims = self.config.jwt().verify(token)?;

        let user = self.repo.find_by_id(&claims.user_id()).await?;

        user.ok_or_else(|| {
            tracing::warn!(user_id = %claims.sub, "Valid token for a user that no longer exists");
            AuthError::UserNotFound
        })
    }
}
