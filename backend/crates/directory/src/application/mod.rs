//! Application Layer
//!
//! Use cases and application services.

pub mod access_guard;
pub mod config;
pub mod groups;
pub mod sign_in;
pub mod sign_up;
pub mod users;

// Re-exports
pub use access_guard::{AccessGuard, AuthenticatedUser};
pub use config::AuthConfig;
pub use groups::GroupDirectoryUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use users::{UpdateUserInput, UserDirectoryUseCase};
