//! Group Entity
//!
//! Named collection of users. Uniqueness of the name is enforced by a
//! storage constraint; membership lives in the Membership entity.

use chrono::{DateTime, Utc};

use crate::domain::value_object::group_id::GroupId;

/// Group entity
#[derive(Debug, Clone)]
pub struct Group {
    /// Internal UUID identifier (also the exposed id)
    pub group_id: GroupId,
    /// Group name (unique)
    pub name: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group
    pub fn new(name: String) -> Self {
        let now = Utc::now();

        Self {
            group_id: GroupId::new(),
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the group
    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}
