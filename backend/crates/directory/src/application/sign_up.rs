//! Sign Up Use Case
//!
//! Creates a new user account. The password is hashed before anything is
//! persisted; duplicate username/email surfaces from the storage
//! constraint as 406.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{DirectoryError, DirectoryResult};

/// Sign up input
pub struct SignUpInput {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: SignUpInput) -> DirectoryResult<User> {
        let user_name = UserName::new(input.user_name)
            .map_err(|e| DirectoryError::Validation(e.message().to_string()))?;
        let email = Email::new(input.email)
            .map_err(|e| DirectoryError::Validation(e.message().to_string()))?;

        let raw_password = RawPassword::new(input.password)?;
        let password = UserPassword::from_raw(&raw_password)?;

        let user = User::new(
            user_name,
            email,
            input.first_name,
            input.last_name,
            password,
        );

        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(user)
    }
}
