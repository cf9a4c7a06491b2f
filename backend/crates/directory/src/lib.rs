//! Directory Backend Module
//!
//! User and group administration: registration, credential sign-in issuing
//! bearer tokens, and scope-gated CRUD over users, groups and memberships.
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, fresh salt per hash
//! - Stateless signed bearer tokens (HS256, 30 minute window)
//! - Token scopes derived deterministically from role flags:
//!   superuser gets every scope, staff the read subset, ordinary
//!   users none (self-service is authorized by ownership)
//! - Inactive accounts are never treated as authenticated

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{DirectoryError, DirectoryResult};
pub use infra::postgres::PgDirectoryRepository;
pub use presentation::router::directory_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgDirectoryRepository as DirectoryStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
