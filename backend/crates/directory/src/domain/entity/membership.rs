//! Membership Entity
//!
//! Explicit join record between one user and one group, with room for
//! per-link metadata. An implicit link table would leave `extra_data`
//! nowhere to live.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{group_id::GroupId, user_id::UserId};

/// User-group association
#[derive(Debug, Clone)]
pub struct Membership {
    pub user_id: UserId,
    pub group_id: GroupId,
    /// Optional per-link metadata
    pub extra_data: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Create a new membership
    pub fn new(user_id: UserId, group_id: GroupId, extra_data: Option<String>) -> Self {
        Self {
            user_id,
            group_id,
            extra_data,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_membership() {
        let m = Membership::new(UserId::new(), GroupId::new(), Some("chair".to_string()));
        assert_eq!(m.extra_data.as_deref(), Some("chair"));
    }
}
