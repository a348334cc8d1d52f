//! Presentation Layer
//!
//! HTTP handlers and DTOs for the API.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CommissionAppState;
pub use router::{commission_router, commission_router_generic, commission_routes};
