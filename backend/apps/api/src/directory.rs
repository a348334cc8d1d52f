//! User Directory
//!
//! Lets the commission routes check `app_user` ids against the auth users table.

use auth::AppError;
use auth::PgUserRepository;
use auth::domain::repository::UserRepository;
use commission::{CommissionError, CommissionResult, UserDirectory};
use kernel::id::UserId;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AuthUserDirectory {
    repo: PgUserRepository,
}

impl AuthUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: PgUserRepository::new(pool),
        }
    }
}

impl UserDirectory for AuthUserDirectory {
    async fn user_exists(&self, user_id: &UserId) -> CommissionResult<bool> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await
            .map_err(|e| CommissionError::from(AppError::from(e)))?;
        Ok(user.is_some())
    }
}
