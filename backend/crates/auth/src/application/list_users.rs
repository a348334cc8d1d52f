//! List Users Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

pub struct ListUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ListUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Users ordered by lastname, then firstname (case-insensitive)
    pub async fn execute(&self) -> AuthResult<Vec<User>> {
        let mut users = self.repo.list().await?;
        users.sort_by_cached_key(|u| (u.lastname.sort_key(), u.firstname.sort_key()));
        Ok(users)
    }
}
