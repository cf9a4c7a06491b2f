//! Request Authentication
//!
//! Extracts `Authorization: Bearer <token>`, runs the access guard once,
//! and hands the resolved identity to the handler as an explicit
//! argument. Handlers declare [`CurrentUser`] and never re-derive the
//! caller.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::application::access_guard::{AccessGuard, AuthenticatedUser};
use crate::domain::repository::{GroupRepository, MembershipRepository, UserRepository};
use crate::error::DirectoryError;
use crate::presentation::handlers::DirectoryAppState;

/// Resolved caller identity, available to any protected handler
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

/// Pull the token out of the Authorization header
///
/// `Bearer` with anything other than a single token value is treated as
/// no token at all.
pub fn extract_bearer(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }

    Some(token)
}

impl<R> FromRequestParts<DirectoryAppState<R>> for CurrentUser
where
    R: UserRepository
        + GroupRepository
        + MembershipRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    type Rejection = DirectoryError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &DirectoryAppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(parts).ok_or(DirectoryError::Unauthenticated)?;

        let guard = AccessGuard::new(state.repo.clone(), state.config.clone());
        let auth = guard.resolve(token).await?;

        Ok(CurrentUser(auth))
    }
}
