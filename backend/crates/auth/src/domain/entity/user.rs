//! User Entity
//!
//! A back-office operator. The password hash lives on the entity but is
//! never part of any response DTO.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    UserId, email::Email, person_name::PersonName, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, lower-cased
    pub email: Email,
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: Email,
        firstname: PersonName,
        lastname: PersonName,
        password_hash: UserPassword,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            firstname,
            lastname,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the password hash
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.touch();
    }

    /// `updated_at` never moves backwards, even if the clock does
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
