//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Duplicate usernames/emails/group names are NOT pre-checked here: the
//! storage layer reports its unique-constraint violation and the error
//! table maps it to 406. One round-trip, no races.

use crate::domain::entity::{group::Group, membership::Membership, user::User};
use crate::domain::value_object::{
    email::Email, group_id::GroupId, user_id::UserId, user_name::UserName,
};
use crate::error::DirectoryResult;
use chrono::{DateTime, Utc};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> DirectoryResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> DirectoryResult<Option<User>>;

    /// Find user by canonical username
    async fn find_by_user_name(&self, user_name: &UserName) -> DirectoryResult<Option<User>>;

    /// Find user by canonical email
    async fn find_by_email(&self, email: &Email) -> DirectoryResult<Option<User>>;

    /// All users, ordered by first name
    async fn list(&self) -> DirectoryResult<Vec<User>>;

    /// Update user
    async fn update(&self, user: &User) -> DirectoryResult<()>;

    /// Refresh the last-login timestamp only
    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> DirectoryResult<()>;

    /// Delete a user; returns false if absent
    async fn delete(&self, user_id: &UserId) -> DirectoryResult<bool>;
}

/// Group repository trait
#[trait_variant::make(GroupRepository: Send)]
pub trait LocalGroupRepository {
    /// Create a new group
    async fn create(&self, group: &Group) -> DirectoryResult<()>;

    /// Find group by ID
    async fn find_by_id(&self, group_id: &GroupId) -> DirectoryResult<Option<Group>>;

    /// All groups, ordered by name
    async fn list(&self) -> DirectoryResult<Vec<Group>>;

    /// Update group
    async fn update(&self, group: &Group) -> DirectoryResult<()>;

    /// Delete a group; returns false if absent
    async fn delete(&self, group_id: &GroupId) -> DirectoryResult<bool>;
}

/// Membership repository trait
#[trait_variant::make(MembershipRepository: Send)]
pub trait LocalMembershipRepository {
    /// Attach a user to a group; replaces extra_data if already attached
    async fn upsert(&self, membership: &Membership) -> DirectoryResult<()>;

    /// Detach a user from a group; returns false if not attached
    async fn remove(&self, user_id: &UserId, group_id: &GroupId) -> DirectoryResult<bool>;

    /// Groups a user belongs to, ordered by name
    async fn groups_of_user(&self, user_id: &UserId) -> DirectoryResult<Vec<Group>>;

    /// Users in a group, ordered by first name
    async fn users_in_group(&self, group_id: &GroupId) -> DirectoryResult<Vec<User>>;
}
