//! Seed User Use Case
//!
//! Makes sure a first operator account exists on a fresh database.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::create_user::{CreateUserInput, CreateUserUseCase};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::AuthResult;

pub const DEFAULT_SEED_EMAIL: &str = "test@test.fr";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(UserId),
    AlreadyPresent,
    /// No seed password configured
    Skipped,
}

pub struct SeedUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SeedUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, email: &str, password: Option<String>) -> AuthResult<SeedOutcome> {
        let parsed = Email::new(email)?;

        if self.repo.exists_by_email(&parsed).await? {
            tracing::debug!(email = %parsed, "Seed user already present");
            return Ok(SeedOutcome::AlreadyPresent);
        }

        let Some(password) = password else {
            tracing::warn!(
                email = %parsed,
                "USER_SEED_PASSWORD is not set, skipping seed user creation"
            );
            return Ok(SeedOutcome::Skipped);
        };

        let user = CreateUserUseCase::new(self.repo.clone(), self.config.clone())
            .execute(CreateUserInput {
                email: parsed.into_db(),
                firstname: "Admin".to_string(),
                lastname: "User".to_string(),
                password,
            })
            .await?;

        tracing::info!(user_id = %user.user_id, email = %email, "Seed user created");

        Ok(SeedOutcome::Created(user.user_id))
    }
}
