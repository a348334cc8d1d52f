//! Session Claims
//!
//! Payload of the `jwt` cookie. Sessions are stateless: nothing is stored
//! server-side, the signature and `exp` are the whole story.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::value_object::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

impl SessionClaims {
    pub fn issue(user: &User, ttl: Duration) -> Self {
        Self::issue_at(user, ttl, Utc::now())
    }

    pub fn issue_at(user: &User, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            sub: user.user_id.into_uuid(),
            email: user.email.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}
