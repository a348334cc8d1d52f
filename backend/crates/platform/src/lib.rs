//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management
//! - Session token signing and verification (JWT, HS256)
//! - Validated JSON request extraction

pub mod cookie;
pub mod jwt;
pub mod password;
pub mod request;
