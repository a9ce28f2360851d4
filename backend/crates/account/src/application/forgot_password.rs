//! Forgot Password Use Case
//!
//! Issues a password reset link. The outcome is never revealed to the
//! caller, so the handler shows the same message for every identifier.

use std::sync::Arc;

use platform::mail::Mailer;

use crate::application::config::AccountConfig;
use crate::application::mail_templates;
use crate::application::sign_in::find_user_by_identifier;
use crate::domain::entity::PasswordResetToken;
use crate::domain::repository::{PasswordResetTokenRepository, UserRepository};
use crate::error::{AccountError, AccountResult};

pub const RESET_LINK_SENT: &str =
    "If an account with that username or email exists, we have sent a password reset link.";

pub struct ForgotPasswordUseCase<U, P, M>
where
    U: UserRepository,
    P: PasswordResetTokenRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    token_repo: Arc<P>,
    mailer: Arc<M>,
    config: Arc<AccountConfig>,
}

impl<U, P, M> ForgotPasswordUseCase<U, P, M>
where
    U: UserRepository,
    P: PasswordResetTokenRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<P>,
        mailer: Arc<M>,
        config: Arc<AccountConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, identifier: &str) -> AccountResult<()> {
        if identifier.trim().is_empty() {
            return Err(AccountError::MissingFields(
                "Please enter your username or email",
            ));
        }

        let Some(user) = find_user_by_identifier(self.user_repo.as_ref(), identifier).await?
        else {
            tracing::debug!("Password reset requested for unknown identifier");
            return Ok(());
        };

        let Some(email) = user.email.as_ref() else {
            tracing::debug!(user_id = %user.user_id, "Password reset requested without email");
            return Ok(());
        };

        self.token_repo.delete_all_for_user(&user.user_id).await?;
        let (token, raw) =
            PasswordResetToken::issue(user.user_id, self.config.password_reset_ttl());
        self.token_repo.create(&token).await?;

        let link = self
            .config
            .token_link("/account/reset-password", raw.as_str());
        let message = mail_templates::password_reset_email(email, &user.user_name, &link);

        match self.mailer.send(&message).await {
            Ok(()) => tracing::info!(user_id = %user.user_id, "Password reset link issued"),
            Err(e) => {
                tracing::warn!(user_id = %user.user_id, error = %e, "Password reset email failed")
            }
        }

        Ok(())
    }
}
