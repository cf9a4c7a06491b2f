//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. Holds only the Argon2id PHC
//! hash; the clear text never reaches an entity or the database.

use crate::error::{DirectoryError, DirectoryResult};
use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword`; memory is zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password
    ///
    /// Rejects only malformed input (empty / control characters); length
    /// and strength policy is deliberately not enforced here.
    pub fn new(raw: String) -> DirectoryResult<Self> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password hash
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword) -> DirectoryResult<Self> {
        Ok(Self(raw.0.hash()?))
    }

    /// Restore from a PHC string loaded from the database
    pub fn from_phc_string(s: impl Into<String>) -> DirectoryResult<Self> {
        HashedPassword::from_phc_string(s)
            .map(Self)
            .map_err(|_| DirectoryError::Internal("Stored password hash is malformed".to_string()))
    }

    /// Verify a raw password against this hash (constant-time)
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(&raw.0)
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
