//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user (email must be free)
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist names, password hash and `updated_at`
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// All users, ordered by lastname then firstname
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Returns false when no such user existed
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}
