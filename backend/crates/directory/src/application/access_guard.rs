//! Access Guard Use Case
//!
//! Resolves a presented bearer token to an authenticated user, then
//! answers scope and ownership questions for the handlers.
//!
//! Terminal states per request, no retries:
//! 1. no token → 401
//! 2. decode failure (bad signature, expired, malformed) → 401
//! 3. subject resolves to no user → 401
//! 4. user inactive → 401
//! 5. required scope missing and not superuser → 403
//! 6. otherwise authenticated

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{scope::Scope, user_id::UserId, user_name::UserName};
use crate::error::{DirectoryError, DirectoryResult};

/// Caller identity resolved once per request
///
/// Carries the user record and the scopes the token was minted with.
/// Injected into the handler's execution context; handlers never
/// re-derive it.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token_scopes: Vec<Scope>,
}

impl AuthenticatedUser {
    /// Whether this caller may perform an operation requiring `scope`
    ///
    /// Superusers hold every scope implicitly.
    pub fn has_scope(&self, scope: Scope) -> bool {
        self.user.is_superuser || self.token_scopes.contains(&scope)
    }

    /// Require a scope, 403 otherwise
    pub fn require_scope(&self, scope: Scope) -> DirectoryResult<()> {
        if self.has_scope(scope) {
            Ok(())
        } else {
            Err(DirectoryError::InsufficientScope)
        }
    }

    /// Require either ownership of `target` or a scope, 403 otherwise
    ///
    /// This is the self-service rule: an ordinary user operates on their
    /// own record without any elevated scope.
    pub fn require_scope_or_self(&self, target: &UserId, scope: Scope) -> DirectoryResult<()> {
        if self.user.is_self(target) {
            Ok(())
        } else {
            self.require_scope(scope)
        }
    }
}

/// Access guard use case
pub struct AccessGuard<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> AccessGuard<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Resolve a bearer token to its user
    ///
    /// Exactly one storage lookup; identical tokens re-validate from
    /// scratch on every call.
    pub async fn resolve(&self, token: &str) -> DirectoryResult<AuthenticatedUser> {
        let claims = self.config.codec().decode(token)?;

        let user_name =
            UserName::new(claims.sub.as_str()).map_err(|_| DirectoryError::Unauthenticated)?;

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(DirectoryError::Unauthenticated)?;

        // An inactive account must never be treated as authenticated,
        // even with a token minted while it was active
        if !user.is_active {
            return Err(DirectoryError::Unauthenticated);
        }

        // Unknown scope labels are dropped silently
        let token_scopes = claims
            .scopes
            .iter()
            .filter_map(|s| Scope::from_code(s))
            .collect();

        Ok(AuthenticatedUser { user, token_scopes })
    }
}
