//! User Entity
//!
//! Identity record: profile, role flags, password hash, login timestamp.
//! Uniqueness of username and email is enforced by storage constraints.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, scope::Scope, user_id::UserId, user_name::UserName,
    user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (also the exposed id)
    pub user_id: UserId,
    /// Username (unique on canonical form, token subject)
    pub user_name: UserName,
    /// Email (unique, canonical lowercase)
    pub email: Email,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Argon2id password hash
    pub password: UserPassword,
    /// Superuser flag: implicit access to every scope
    pub is_superuser: bool,
    /// Staff flag: read-subset scopes at sign-in
    pub is_staff: bool,
    /// Inactive accounts can neither sign in nor authenticate
    pub is_active: bool,
    /// Last successful sign-in time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new ordinary, active user
    pub fn new(
        user_name: UserName,
        email: Email,
        first_name: String,
        last_name: String,
        password: UserPassword,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            first_name,
            last_name,
            password,
            is_superuser: false,
            is_staff: false,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful sign-in
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Check if the account may sign in / authenticate
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Check whether `id` identifies this user
    pub fn is_self(&self, id: &UserId) -> bool {
        &self.user_id == id
    }

    /// Scopes issued to a token minted for this user
    ///
    /// Deterministic from role flags: superuser gets all, staff the read
    /// subset, ordinary users none.
    pub fn granted_scopes(&self) -> Vec<Scope> {
        if self.is_superuser {
            Scope::ALL.to_vec()
        } else if self.is_staff {
            Scope::STAFF.to_vec()
        } else {
            Vec::new()
        }
    }

    /// Update username
    pub fn set_user_name(&mut self, user_name: UserName) {
        self.user_name = user_name;
        self.updated_at = Utc::now();
    }

    /// Update email
    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Update given/family name
    pub fn set_names(&mut self, first_name: Option<String>, last_name: Option<String>) {
        if let Some(first) = first_name {
            self.first_name = first;
        }
        if let Some(last) = last_name {
            self.last_name = last;
        }
        self.updated_at = Utc::now();
    }

    /// Replace the password hash
    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    /// Update role/status flags (superuser-only at the application layer)
    pub fn set_flags(
        &mut self,
        is_superuser: Option<bool>,
        is_staff: Option<bool>,
        is_active: Option<bool>,
    ) {
        if let Some(v) = is_superuser {
            self.is_superuser = v;
        }
        if let Some(v) = is_staff {
            self.is_staff = v;
        }
        if let Some(v) = is_active {
            self.is_active = v;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn sample_user() -> User {
        let raw = RawPassword::new("a sample password".to_string()).unwrap();
        User::new(
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            "Alice".to_string(),
            "Smith".to_string(),
            UserPassword::from_raw(&raw).unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();
        assert!(!user.is_superuser);
        assert!(!user.is_staff);
        assert!(user.is_active);
        assert!(user.last_login_at.is_none());
        assert!(user.can_login());
    }

    #[test]
    fn test_record_login() {
        let mut user = sample_user();
        user.record_login();
        assert!(user.last_login_at.is_some());
    }

    #[test]
    fn test_ordinary_user_has_no_scopes() {
        let user = sample_user();
        assert!(user.granted_scopes().is_empty());
    }

    #[test]
    fn test_staff_scopes_are_read_subset() {
        let mut user = sample_user();
        user.set_flags(None, Some(true), None);
        assert_eq!(user.granted_scopes(), Scope::STAFF.to_vec());
    }

    #[test]
    fn test_superuser_scopes_are_all() {
        let mut user = sample_user();
        user.set_flags(Some(true), None, None);
        assert_eq!(user.granted_scopes(), Scope::ALL.to_vec());
    }

    #[test]
    fn test_inactive_cannot_login() {
        let mut user = sample_user();
        user.set_flags(None, None, Some(false));
        assert!(!user.can_login());
    }

    #[test]
    fn test_is_self() {
        let user = sample_user();
        let id = user.user_id;
        assert!(user.is_self(&id));
        assert!(!user.is_self(&UserId::new()));
    }
}
