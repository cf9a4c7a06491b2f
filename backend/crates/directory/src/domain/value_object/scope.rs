//! Scope Value Object
//!
//! Scopes are plain string capability labels: a token carries a set, a
//! route requires a set. Issuance is deterministic from role flags:
//! superusers get everything, staff the read subset, ordinary users none
//! (their self-service operations are authorized by ownership instead).

use derive_more::Display;

/// Capability label a token can carry and an operation can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Scope {
    #[display("user_list")]
    UserList,
    #[display("user_read")]
    UserRead,
    #[display("user_update")]
    UserUpdate,
    #[display("user_delete")]
    UserDelete,
    #[display("group_list")]
    GroupList,
    #[display("group_read")]
    GroupRead,
    #[display("group_create")]
    GroupCreate,
    #[display("group_update")]
    GroupUpdate,
    #[display("group_delete")]
    GroupDelete,
}

impl Scope {
    /// Every scope, in declaration order
    pub const ALL: [Scope; 9] = [
        Scope::UserList,
        Scope::UserRead,
        Scope::UserUpdate,
        Scope::UserDelete,
        Scope::GroupList,
        Scope::GroupRead,
        Scope::GroupCreate,
        Scope::GroupUpdate,
        Scope::GroupDelete,
    ];

    /// The read subset issued to staff accounts
    pub const STAFF: [Scope; 4] = [
        Scope::UserList,
        Scope::UserRead,
        Scope::GroupList,
        Scope::GroupRead,
    ];

    /// Wire representation
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Scope::UserList => "user_list",
            Scope::UserRead => "user_read",
            Scope::UserUpdate => "user_update",
            Scope::UserDelete => "user_delete",
            Scope::GroupList => "group_list",
            Scope::GroupRead => "group_read",
            Scope::GroupCreate => "group_create",
            Scope::GroupUpdate => "group_update",
            Scope::GroupDelete => "group_delete",
        }
    }

    /// Parse a wire label; unknown labels yield `None` and are ignored
    /// by the access guard
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        Scope::ALL.into_iter().find(|s| s.code() == code)
    }
}
