//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::jwt::JwtCodec;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Default session lifetime (30 days)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

/// Longest accepted session lifetime, in days
pub const MAX_TOKEN_TTL_DAYS: u64 = 365;
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(MAX_TOKEN_TTL_DAYS * 24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// Token lifetime, also the cookie Max-Age
    pub token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "jwt".to_string(),
            jwt_secret: Vec::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Token lifetime in seconds, clamped to [`MAX_TOKEN_TTL`]
    pub fn token_ttl_secs(&self) -> i64 {
        let secs = self.token_ttl.min(MAX_TOKEN_TTL).as_secs();
        i64::try_from(secs).unwrap_or(0)
    }

    pub fn token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::try_seconds(self.token_ttl_secs()).unwrap_or(chrono::Duration::zero())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn jwt(&self) -> JwtCodec {
        JwtCodec::new(&self.jwt_secret)
    }

    /// Attributes of the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.token_ttl_secs()),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("cookie_name", &self.cookie_name)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
