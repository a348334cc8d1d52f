//! Login Use Case
//!
//! Checks email + password and signs a session token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::issue_session_token;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub user: User,
    /// Signed JWT for the session cookie
    pub token: String,
}

pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // unknown email and wrong password must look the same to the caller
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_verification(input.password);
        if !user
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        if user.password_hash.needs_rehash() {
            tracing::warn!(user_id = %user.user_id, "Password hash uses outdated parameters");
        }

        let token = issue_session_token(&self.config, &user)?;

        tracing::info!(user_id = %user.user_id, email = %user.email, "User logged in");

        Ok(LoginOutput { user, token })
    }
}
