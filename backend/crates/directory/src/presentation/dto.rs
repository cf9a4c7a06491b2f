//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{group::Group, user::User};

// ============================================================================
// Sign Up / Users
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User representation returned by every user endpoint
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            username: user.user_name.original().to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email.as_str().to_string(),
            is_superuser: user.is_superuser,
            is_staff: user.is_staff,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
        }
    }
}

/// Partial user update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_superuser: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in form (OAuth2 password shape: form-encoded, `username` carries
/// the email address)
#[derive(Debug, Clone, Deserialize)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

/// Token response (OAuth2 wire shape, deliberately snake_case)
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

// ============================================================================
// Groups
// ============================================================================

/// Group creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Group rename request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGroupRequest {
    pub name: String,
}

/// Group representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.group_id.into_uuid(),
            name: group.name,
        }
    }
}

// ============================================================================
// Memberships
// ============================================================================

/// Attach-member request body (optional)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachMemberRequest {
    #[serde(default)]
    pub extra_data: Option<String>,
}
