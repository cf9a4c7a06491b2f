//! Group Directory Use Cases
//!
//! CRUD over groups plus membership management. Group mutation scopes
//! (`group_create`, `group_update`, `group_delete`) are only ever issued
//! to superusers; staff hold the read subset.

use std::sync::Arc;

use crate::application::access_guard::AuthenticatedUser;
use crate::domain::entity::{group::Group, membership::Membership, user::User};
use crate::domain::repository::{GroupRepository, MembershipRepository, UserRepository};
use crate::domain::value_object::{group_id::GroupId, scope::Scope, user_id::UserId};
use crate::error::{DirectoryError, DirectoryResult};

/// Maximum group name length (matches the storage column)
const GROUP_NAME_MAX_LENGTH: usize = 150;

/// Group directory use case
pub struct GroupDirectoryUseCase<G, M, U>
where
    G: GroupRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    group_repo: Arc<G>,
    membership_repo: Arc<M>,
    user_repo: Arc<U>,
}

impl<G, M, U> GroupDirectoryUseCase<G, M, U>
where
    G: GroupRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    pub fn new(group_repo: Arc<G>, membership_repo: Arc<M>, user_repo: Arc<U>) -> Self {
        Self {
            group_repo,
            membership_repo,
            user_repo,
        }
    }

    /// All groups, ordered by name
    pub async fn list(&self, caller: &AuthenticatedUser) -> DirectoryResult<Vec<Group>> {
        caller.require_scope(Scope::GroupList)?;
        self.group_repo.list().await
    }

    /// Create a group
    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        name: String,
    ) -> DirectoryResult<Group> {
        caller.require_scope(Scope::GroupCreate)?;

        let name = validate_name(name)?;
        let group = Group::new(name);

        self.group_repo.create(&group).await?;

        tracing::info!(group_id = %group.group_id, name = %group.name, "Group created");

        Ok(group)
    }

    /// One group by id
    pub async fn get(
        &self,
        caller: &AuthenticatedUser,
        group_id: GroupId,
    ) -> DirectoryResult<Group> {
        caller.require_scope(Scope::GroupRead)?;

        self.group_repo
            .find_by_id(&group_id)
            .await?
            .ok_or(DirectoryError::GroupNotFound)
    }

    /// Rename a group
    pub async fn rename(
        &self,
        caller: &AuthenticatedUser,
        group_id: GroupId,
        name: String,
    ) -> DirectoryResult<Group> {
        caller.require_scope(Scope::GroupUpdate)?;

        let name = validate_name(name)?;

        let mut group = self
            .group_repo
            .find_by_id(&group_id)
            .await?
            .ok_or(DirectoryError::GroupNotFound)?;

        group.rename(name);
        self.group_repo.update(&group).await?;

        Ok(group)
    }

    /// Delete a group; memberships cascade in storage
    pub async fn delete(
        &self,
        caller: &AuthenticatedUser,
        group_id: GroupId,
    ) -> DirectoryResult<()> {
        caller.require_scope(Scope::GroupDelete)?;

        if !self.group_repo.delete(&group_id).await? {
            return Err(DirectoryError::GroupNotFound);
        }

        tracing::info!(group_id = %group_id, "Group deleted");

        Ok(())
    }

    /// Users in a group, ordered by first name
    pub async fn users(
        &self,
        caller: &AuthenticatedUser,
        group_id: GroupId,
    ) -> DirectoryResult<Vec<User>> {
        caller.require_scope(Scope::GroupRead)?;

        // 404 before an empty list: a missing group is not an empty group
        self.group_repo
            .find_by_id(&group_id)
            .await?
            .ok_or(DirectoryError::GroupNotFound)?;

        self.membership_repo.users_in_group(&group_id).await
    }

    /// Groups a user belongs to, ordered by name
    ///
    /// User-side read: self-service or `user_read`.
    pub async fn groups_of_user(
        &self,
        caller: &AuthenticatedUser,
        user_id: UserId,
    ) -> DirectoryResult<Vec<Group>> {
        caller.require_scope_or_self(&user_id, Scope::UserRead)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(DirectoryError::UserNotFound)?;

        self.membership_repo.groups_of_user(&user_id).await
    }

    /// Attach a user to a group (idempotent; re-attaching replaces
    /// extra_data)
    pub async fn attach(
        &self,
        caller: &AuthenticatedUser,
        group_id: GroupId,
        user_id: UserId,
        extra_data: Option<String>,
    ) -> DirectoryResult<()> {
        caller.require_scope(Scope::GroupUpdate)?;

        self.group_repo
            .find_by_id(&group_id)
            .await?
            .ok_or(DirectoryError::GroupNotFound)?;
        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(DirectoryError::UserNotFound)?;

        let membership = Membership::new(user_id, group_id, extra_data);
        self.membership_repo.upsert(&membership).await?;

        tracing::info!(group_id = %group_id, user_id = %user_id, "Member attached");

        Ok(())
    }

    /// Detach a user from a group
    pub async fn detach(
        &self,
        caller: &AuthenticatedUser,
        group_id: GroupId,
        user_id: UserId,
    ) -> DirectoryResult<()> {
        caller.require_scope(Scope::GroupUpdate)?;

        if !self.membership_repo.remove(&user_id, &group_id).await? {
            return Err(DirectoryError::MembershipNotFound);
        }

        tracing::info!(group_id = %group_id, user_id = %user_id, "Member detached");

        Ok(())
    }
}

/// Trim and bound the group name
fn validate_name(name: String) -> DirectoryResult<String> {
    let name = name.trim().to_string();

    if name.is_empty() {
        return Err(DirectoryError::Validation(
            "Group name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > GROUP_NAME_MAX_LENGTH {
        return Err(DirectoryError::Validation(format!(
            "Group name must be at most {} characters",
            GROUP_NAME_MAX_LENGTH
        )));
    }

    Ok(name)
}
