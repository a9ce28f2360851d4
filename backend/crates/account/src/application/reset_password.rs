//! Reset Password Use Case
//!
//! Validates reset links and applies the new password. A completed reset
//! signs the user out everywhere.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::PasswordResetToken;
use crate::domain::repository::{PasswordResetTokenRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{PasswordHash, RawPassword, TokenHash, TokenPurpose};
use crate::error::{AccountError, AccountResult};

const PURPOSE: TokenPurpose = TokenPurpose::PasswordReset;

pub const RESET_SUCCESSFUL: &str =
    "Password reset successful! You can now log in with your new password.";

pub struct ResetPasswordInput {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

pub struct ResetPasswordUseCase<U, P, S>
where
    U: UserRepository,
    P: PasswordResetTokenRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<P>,
    session_repo: Arc<S>,
    config: Arc<AccountConfig>,
}

impl<U, P, S> ResetPasswordUseCase<U, P, S>
where
    U: UserRepository,
    P: PasswordResetTokenRepository,
    S: SessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<P>,
        session_repo: Arc<S>,
        config: Arc<AccountConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            session_repo,
            config,
        }
    }

    /// Check a link before showing the form. Expired tokens are consumed.
    pub async fn validate(&self, token: Option<&str>) -> AccountResult<PasswordResetToken> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AccountError::TokenMissing(PURPOSE))?;

        let hash = TokenHash::of(token);
        let row = self
            .token_repo
            .find_by_hash(&hash)
            .await?
            .ok_or(AccountError::TokenInvalid(PURPOSE))?;

        if row.is_expired() {
            self.token_repo.delete(&hash).await?;
            return Err(AccountError::TokenExpired(PURPOSE));
        }

        Ok(row)
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AccountResult<()> {
        if input.token.trim().is_empty()
            || input.password.is_empty()
            || input.confirm_password.is_empty()
        {
            return Err(AccountError::MissingFields("All fields are required"));
        }

        if input.password != input.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }

        let raw_password = RawPassword::new(input.password)?;
        let row = self.validate(Some(&input.token)).await?;

        let mut user = self
            .user_repo
            .find_by_id(&row.user_id)
            .await?
            .ok_or(AccountError::TokenInvalid(PURPOSE))?;

        let password = PasswordHash::from_raw(&raw_password, self.config.pepper())?;
        if !self.token_repo.delete(&row.token_hash).await? {
            return Err(AccountError::TokenInvalid(PURPOSE));
        }

        user.set_password(password);
        self.user_repo.update(&user).await?;
        let revoked = self.session_repo.delete_all_for_user(&user.user_id).await?;

        tracing::info!(
            user_id = %user.user_id,
            revoked_sessions = revoked,
            "Password reset completed"
        );

        Ok(())
    }
}
