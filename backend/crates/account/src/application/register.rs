//! Register Use Case
//!
//! Creates a new user account in the regular user group.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{PasswordHash, RawPassword, UserId, UserName};
use crate::error::{AccountError, AccountResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
    /// Name as typed (after normalization), prefilled on the login form
    pub user_name: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<RegisterOutput> {
        if input.user_name.trim().is_empty() || input.password.is_empty() {
            return Err(AccountError::MissingFields(
                "Username and password are required",
            ));
        }

        // Password policy first, then the name
        let raw_password = RawPassword::new(input.password)?;
        let user_name = UserName::new(&input.user_name)?;

        if self
            .user_repo
            .exists_by_user_name(user_name.canonical(), None)
            .await?
        {
            return Err(AccountError::UserNameTaken);
        }

        let password_hash = PasswordHash::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(user_name, password_hash);

        // A concurrent registration surfaces as UserNameTaken from the insert
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            public_id = %user.public_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id,
            user_name: user.user_name.original().to_string(),
        })
    }
}
