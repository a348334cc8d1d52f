//! Session Token Issuance

use crate::application::config::AuthConfig;
use crate::domain::entity::{session::SessionClaims, user::User};
use crate::error::AuthResult;

/// Sign a fresh session token for `user`
pub fn issue_session_token(config: &AuthConfig, user: &User) -> AuthResult<String> {
    let claims = SessionClaims::issue(user, config.token_ttl_chrono());
    Ok(config.jwt().sign(&claims)?)
}
