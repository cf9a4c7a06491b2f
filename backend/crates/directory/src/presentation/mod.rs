//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the bearer-token extractor.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::DirectoryAppState;
pub use middleware::CurrentUser;
pub use router::{directory_router, directory_router_generic};
