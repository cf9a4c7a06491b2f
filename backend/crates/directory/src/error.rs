//! Directory Error Types
//!
//! This module provides directory-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! The HTTP mapping in [`DirectoryError::kind`] is the single table the
//! presentation layer relies on: uniqueness violations surface as 406,
//! storage connectivity as 503, missing credentials as 401, and
//! insufficient scope as 403.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordInputError};
use platform::token::TokenError;
use thiserror::Error;

/// Directory-specific result type alias
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory-specific error variants
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Group not found
    #[error("Group not found")]
    GroupNotFound,

    /// Membership not found
    #[error("Membership not found")]
    MembershipNotFound,

    /// Username or email already taken
    #[error("Username or Email already exists")]
    DuplicateUser,

    /// Group name already taken
    #[error("Group already exists")]
    DuplicateGroup,

    /// Wrong email or password (deliberately indistinguishable)
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Missing, malformed, expired or otherwise invalid bearer token,
    /// or the resolved account is inactive
    #[error("Could not validate credentials")]
    Unauthenticated,

    /// Authenticated, but the token lacks a required scope or the caller
    /// does not own the target resource
    #[error("Insufficient scope for this operation")]
    InsufficientScope,

    /// Malformed input (field-level detail in the message)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Storage or kernel-level failure, already classified
    #[error(transparent)]
    App(AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DirectoryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    ///
    /// This is the error-to-status table for the whole crate.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::UserNotFound
            | DirectoryError::GroupNotFound
            | DirectoryError::MembershipNotFound => ErrorKind::NotFound,
            DirectoryError::DuplicateUser | DirectoryError::DuplicateGroup => {
                ErrorKind::NotAcceptable
            }
            DirectoryError::InvalidCredentials | DirectoryError::Unauthenticated => {
                ErrorKind::Unauthorized
            }
            DirectoryError::InsufficientScope => ErrorKind::Forbidden,
            DirectoryError::Validation(_) => ErrorKind::BadRequest,
            DirectoryError::App(e) => e.kind(),
            DirectoryError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            DirectoryError::App(e) => e,
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            DirectoryError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Directory storage error");
            }
            DirectoryError::Internal(msg) => {
                tracing::error!(message = %msg, "Directory internal error");
            }
            DirectoryError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            DirectoryError::Unauthenticated => {
                tracing::debug!("Request with missing or invalid token");
            }
            _ => {
                tracing::debug!(error = %self, "Directory error");
            }
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for DirectoryError {
    fn from(err: AppError) -> Self {
        DirectoryError::App(err)
    }
}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        // Classification (406 on duplicates, 503 on connectivity) lives in
        // the kernel conversion table
        DirectoryError::App(AppError::from(err))
    }
}

impl From<TokenError> for DirectoryError {
    fn from(_: TokenError) -> Self {
        // InvalidSignature / Expired / Malformed all collapse to 401
        DirectoryError::Unauthenticated
    }
}

impl From<PasswordInputError> for DirectoryError {
    fn from(err: PasswordInputError) -> Self {
        DirectoryError::Validation(err.to_string())
    }
}

impl From<PasswordHashError> for DirectoryError {
    fn from(err: PasswordHashError) -> Self {
        DirectoryError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(DirectoryError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(DirectoryError::GroupNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            DirectoryError::DuplicateUser.status_code(),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            DirectoryError::DuplicateGroup.status_code(),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            DirectoryError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            DirectoryError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            DirectoryError::InsufficientScope.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            DirectoryError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_token_errors_collapse_to_unauthenticated() {
        for te in [
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::Malformed,
        ] {
            let err: DirectoryError = te.into();
            assert!(matches!(err, DirectoryError::Unauthenticated));
        }
    }

    #[test]
    fn test_credentials_and_unauthenticated_share_status() {
        // Anti-enumeration: same status either way
        assert_eq!(
            DirectoryError::InvalidCredentials.status_code(),
            DirectoryError::Unauthenticated.status_code()
        );
    }
}
