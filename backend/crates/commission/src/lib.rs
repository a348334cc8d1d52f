//! Commission Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, rules, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! Users are owned by the auth crate; this crate only checks that a user
//! exists, through the [`UserDirectory`] trait the api binary implements.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::repository::{LocalUserDirectory, UserDirectory};
pub use error::{CommissionError, CommissionResult};
pub use infra::postgres::PgCommissionRepository;
pub use presentation::router::{commission_router, commission_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
