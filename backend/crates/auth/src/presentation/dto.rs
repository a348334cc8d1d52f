//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::validation::{Validate, ValidationErrors};
use platform::password::{ClearTextPassword, MIN_PASSWORD_LENGTH};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if Email::new(self.email.as_str()).is_err() {
            errors.add_field("email", "Invalid email address");
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add_field(
                "password",
                format!("Password must contain at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }

        errors.into_result()
    }
}

// ============================================================================
// Change Password
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.current_password.is_empty() {
            errors.add_field("currentPassword", "Required");
        }
        if let Err(e) = ClearTextPassword::new(self.new_password.clone()) {
            errors.add_field("newPassword", e.to_string());
        }

        errors.into_result()
    }
}

// ============================================================================
// Responses
// ============================================================================

/// User as returned to clients (no password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            email: user.email.as_str().to_string(),
            firstname: user.firstname.as_str().to_string(),
            lastname: user.lastname.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// List envelope shared by every collection endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub docs: Vec<UserResponse>,
    pub total_docs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
