//! Create User Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::PersonName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct CreateUserInput {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
}

pub struct CreateUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CreateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: CreateUserInput) -> AuthResult<User> {
        let email = Email::new(input.email)?;
        let firstname = PersonName::new(&input.firstname)?;
        let lastname = PersonName::new(&input.lastname)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(email, firstname, lastname, password_hash);
        self.repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, email = %user.email, "User created");

        Ok(user)
    }
}
