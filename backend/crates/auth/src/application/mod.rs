//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod change_password;
pub mod config;
pub mod create_user;
pub mod list_users;
pub mod login;
pub mod seed;
pub mod session;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use list_users::ListUsersUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use seed::{SeedOutcome, SeedUserUseCase};
pub use session::issue_session_token;
