//! User Name Value Object
//!
//! The username is the public handle and the token subject. Mixed case is
//! accepted and preserved for display; the canonical (lowercase) form is
//! what uniqueness and lookups key on.
//!
//! Invariants (after NFKC normalization):
//! - 1 to 150 characters
//! - letters, digits and `@ . + - _` only
//! - at least one alphanumeric character

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for a username (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 150;

/// Characters allowed besides letters and digits
const ALLOWED_SPECIAL_CHARS: &[char] = &['@', '.', '+', '-', '_'];

/// User name value object
///
/// Keeps both the display form as entered and the canonical lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new user name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let normalized: String = name.into().nfkc().collect();
        let original = normalized.trim().to_string();

        if original.is_empty() {
            return Err(AppError::bad_request("Username cannot be empty"));
        }

        let char_count = original.chars().count();
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        for ch in original.chars() {
            if !ch.is_alphanumeric() && !ALLOWED_SPECIAL_CHARS.contains(&ch) {
                return Err(AppError::bad_request(
                    "Username may only contain letters, digits and @ . + - _",
                ));
            }
        }

        if !original.chars().any(|c| c.is_alphanumeric()) {
            return Err(AppError::bad_request(
                "Username must contain at least one letter or digit",
            ));
        }

        let canonical = original.to_lowercase();

        Ok(Self {
            original,
            canonical,
        })
    }

    /// Create from database values (assumed already validated)
    pub fn from_db(original: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            canonical: canonical.into(),
        }
    }

    /// Display form, as the user entered it
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Canonical lowercase form, used for uniqueness and token subjects
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
