//! Sign In Use Case
//!
//! Authenticates by email + password and mints a signed bearer token.
//!
//! Every failure path returns the same `InvalidCredentials`: unknown
//! email, wrong password and inactive account are indistinguishable to
//! the caller, so responses cannot be used to enumerate accounts.

use std::sync::Arc;

use platform::token::Claims;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{DirectoryError, DirectoryResult};

/// Argon2id hash of nothing in particular. Verified against on user-miss
/// so the response time does not reveal whether the email exists.
const DUMMY_PHC: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Sign in input
pub struct SignInInput {
    /// Email address (the sign-in form's `username` field)
    pub email: String,
    /// Password
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed bearer token
    pub access_token: String,
    /// Always "bearer"
    pub token_type: &'static str,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> DirectoryResult<SignInOutput> {
        let email =
            Email::new(input.email.as_str()).map_err(|_| DirectoryError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| DirectoryError::InvalidCredentials)?;

        let user = self.authenticate(&email, &raw_password).await?;

        // Refresh last_login before minting; a failed write should not
        // block the sign-in itself
        if let Err(e) = self
            .user_repo
            .record_login(&user.user_id, chrono::Utc::now())
            .await
        {
            tracing::warn!(error = %e, "Failed to record login timestamp");
        }

        let scopes = user
            .granted_scopes()
            .iter()
            .map(|s| s.code().to_string())
            .collect();

        let claims = Claims::new(user.user_name.canonical(), scopes, self.config.token_ttl);
        let access_token = self
            .config
            .codec()
            .encode(&claims)
            .map_err(|e| DirectoryError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            access_token,
            token_type: "bearer",
        })
    }

    /// Look up by email and verify the password
    ///
    /// Returns the user only on a full match against an active account.
    async fn authenticate(
        &self,
        email: &Email,
        raw_password: &RawPassword,
    ) -> DirectoryResult<User> {
        let user = self.user_repo.find_by_email(email).await?;

        let Some(user) = user else {
            // Burn a verification anyway to keep timing flat
            if let Ok(dummy) = UserPassword::from_phc_string(DUMMY_PHC) {
                let _ = dummy.verify(raw_password);
            }
            return Err(DirectoryError::InvalidCredentials);
        };

        if !user.password.verify(raw_password) {
            return Err(DirectoryError::InvalidCredentials);
        }

        if !user.can_login() {
            return Err(DirectoryError::InvalidCredentials);
        }

        Ok(user)
    }
}
