//! User Directory Use Cases
//!
//! CRUD over user records. Each method makes exactly one authorization
//! decision up front, then performs one transactional unit against
//! storage.
//!
//! Self-service: callers always reach their own record; reaching anyone
//! else's requires the matching `user_*` scope (or superuser).

use std::sync::Arc;

use crate::application::access_guard::AuthenticatedUser;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, scope::Scope, user_id::UserId, user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{DirectoryError, DirectoryResult};

/// Partial update; absent fields are left untouched
#[derive(Default)]
pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_superuser: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdateUserInput {
    /// Whether the update touches role/status flags
    fn touches_flags(&self) -> bool {
        self.is_superuser.is_some() || self.is_staff.is_some() || self.is_active.is_some()
    }
}

/// User directory use case
pub struct UserDirectoryUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserDirectoryUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// All users, ordered by first name
    pub async fn list(&self, caller: &AuthenticatedUser) -> DirectoryResult<Vec<User>> {
        caller.require_scope(Scope::UserList)?;
        self.user_repo.list().await
    }

    /// One user by id
    pub async fn get(
        &self,
        caller: &AuthenticatedUser,
        user_id: UserId,
    ) -> DirectoryResult<User> {
        caller.require_scope_or_self(&user_id, Scope::UserRead)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(DirectoryError::UserNotFound)
    }

    /// Partial update of a user
    ///
    /// Only superusers may change `is_superuser`, `is_staff` or
    /// `is_active`, on anyone, including themselves.
    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> DirectoryResult<User> {
        caller.require_scope_or_self(&user_id, Scope::UserUpdate)?;

        let touches_flags = input.touches_flags();

        if touches_flags && !caller.user.is_superuser {
            return Err(DirectoryError::InsufficientScope);
        }

        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(DirectoryError::UserNotFound)?;

        if input.first_name.is_some() || input.last_name.is_some() {
            user.set_names(input.first_name, input.last_name);
        }

        if let Some(name) = input.user_name {
            let user_name = UserName::new(name)
                .map_err(|e| DirectoryError::Validation(e.message().to_string()))?;
            user.set_user_name(user_name);
        }

        if let Some(email) = input.email {
            let email = Email::new(email)
                .map_err(|e| DirectoryError::Validation(e.message().to_string()))?;
            user.set_email(email);
        }

        if let Some(password) = input.password {
            let raw = RawPassword::new(password)?;
            user.set_password(UserPassword::from_raw(&raw)?);
        }

        if touches_flags {
            user.set_flags(input.is_superuser, input.is_staff, input.is_active);
        }

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "User updated");

        Ok(user)
    }

    /// Delete a user; memberships cascade in storage
    pub async fn delete(
        &self,
        caller: &AuthenticatedUser,
        user_id: UserId,
    ) -> DirectoryResult<()> {
        caller.require_scope_or_self(&user_id, Scope::UserDelete)?;

        if !self.user_repo.delete(&user_id).await? {
            return Err(DirectoryError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }
}
