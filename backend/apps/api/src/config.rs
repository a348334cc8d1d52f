//! Server Configuration
//!
//! Everything the binary reads from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::seed::DEFAULT_SEED_EMAIL;
use auth::config::{MAX_TOKEN_TTL_DAYS, SameSite};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3003";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3003";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_DAYS: u64 = 30;
const SECS_PER_DAY: u64 = 24 * 3600;

/// Secrets live in here, so no `Debug`
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub seed_email: String,
    pub seed_password: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr: SocketAddr =
            parse_or(get("BIND_ADDR"), "BIND_ADDR", DEFAULT_BIND_ADDR.parse()?)?;
        let max_connections = parse_or(
            get("DATABASE_MAX_CONNECTIONS"),
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let release = !cfg!(debug_assertions);

        let mut auth = match get("JWT_SECRET") {
            Some(secret) => AuthConfig {
                jwt_secret: secret.into_bytes(),
                ..AuthConfig::default()
            },
            None if release => bail!("JWT_SECRET must be set in release builds"),
            None => {
                tracing::warn!("JWT_SECRET not set, using a random secret (sessions end on restart)");
                AuthConfig::with_random_secret()
            }
        };

        let ttl_days: u64 = parse_or(get("JWT_TTL_DAYS"), "JWT_TTL_DAYS", DEFAULT_TOKEN_TTL_DAYS)?;
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&ttl_days) {
            bail!("JWT_TTL_DAYS must be between 1 and {MAX_TOKEN_TTL_DAYS}");
        }
        auth.token_ttl = Duration::from_secs(ttl_days * SECS_PER_DAY);
        auth.cookie_secure = parse_or(get("COOKIE_SECURE"), "COOKIE_SECURE", release)?;
        auth.cookie_same_site = match get("COOKIE_SAME_SITE") {
            Some(raw) => SameSite::from_str(&raw).map_err(anyhow::Error::msg)?,
            None => SameSite::Lax,
        };
        auth.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);

        if auth.cookie_same_site == SameSite::None && !auth.cookie_secure {
            bail!("COOKIE_SAME_SITE=none requires COOKIE_SECURE=true");
        }

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            frontend_origins,
            auth,
            seed_email: get("USER_SEED_EMAIL").unwrap_or_else(|| DEFAULT_SEED_EMAIL.to_string()),
            seed_password: get("USER_SEED_PASSWORD"),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {key} value {value:?}: {e}")),
        None => Ok(default),
    }
}
