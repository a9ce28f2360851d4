//! Settings Use Case
//!
//! Profile view and update. A new email address is not written to `users`
//! until the mailed verification link is followed.

use std::sync::Arc;

use platform::mail::Mailer;

use crate::application::config::AccountConfig;
use crate::application::mail_templates;
use crate::domain::entity::{
    AuthenticatedUser, EmailVerificationToken, User, UserDetails, UserGroup,
};
use crate::domain::repository::{
    EmailVerificationTokenRepository, UserDetailsRepository, UserRepository,
};
use crate::domain::value_object::{Email, UserName};
use crate::error::{AccountError, AccountResult};

/// Everything the settings page shows
#[derive(Debug, Clone)]
pub struct SettingsView {
    pub user: User,
    pub group: UserGroup,
    pub details: UserDetails,
}

/// Settings form input
#[derive(Debug, Default)]
pub struct SettingsInput {
    pub user_name: String,
    pub email: String,
    pub nickname: String,
    pub phone: String,
}

/// What the redirect after a successful update reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOutcome {
    /// `?success=1`
    Saved,
    /// `?success=2`
    VerificationSent,
}

impl SettingsOutcome {
    pub fn query_value(&self) -> &'static str {
        match self {
            SettingsOutcome::Saved => "1",
            SettingsOutcome::VerificationSent => "2",
        }
    }
}

pub struct SettingsUseCase<U, D, E, M>
where
    U: UserRepository,
    D: UserDetailsRepository,
    E: EmailVerificationTokenRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    details_repo: Arc<D>,
    token_repo: Arc<E>,
    mailer: Arc<M>,
    config: Arc<AccountConfig>,
}

impl<U, D, E, M> SettingsUseCase<U, D, E, M>
where
    U: UserRepository,
    D: UserDetailsRepository,
    E: EmailVerificationTokenRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        details_repo: Arc<D>,
        token_repo: Arc<E>,
        mailer: Arc<M>,
        config: Arc<AccountConfig>,
    ) -> Self {
        Self {
            user_repo,
            details_repo,
            token_repo,
            mailer,
            config,
        }
    }

    pub async fn load(&self, viewer: &AuthenticatedUser) -> AccountResult<SettingsView> {
        let details = self
            .details_repo
            .find_by_user_id(&viewer.user.user_id)
            .await?
            .unwrap_or_else(|| UserDetails::empty(viewer.user.user_id));

        Ok(SettingsView {
            user: viewer.user.clone(),
            group: viewer.group.clone(),
            details,
        })
    }

    pub async fn update(
        &self,
        viewer: &AuthenticatedUser,
        input: SettingsInput,
    ) -> AccountResult<SettingsOutcome> {
        let mut user = viewer.user.clone();

        let user_name = UserName::new(&input.user_name)?;
        if self
            .user_repo
            .exists_by_user_name(user_name.canonical(), Some(&user.user_id))
            .await?
        {
            return Err(AccountError::UserNameTaken);
        }

        let email_input = input.email.trim();
        let pending_email = if email_input.is_empty() {
            if user.email.is_some() {
                user.clear_email();
            }
            None
        } else {
            let email = Email::new(email_input)?;
            if user.has_email(&email) {
                None
            } else {
                if self
                    .user_repo
                    .exists_by_email(&email, Some(&user.user_id))
                    .await?
                {
                    return Err(AccountError::EmailTaken);
                }
                Some(email)
            }
        };

        user.set_user_name(user_name);

        // The link goes out before anything is saved; a failed send leaves
        // the profile untouched.
        if let Some(email) = &pending_email {
            self.send_verification(&user, email).await?;
        }

        self.user_repo.update(&user).await?;
        self.details_repo
            .upsert(&UserDetails::new(user.user_id, &input.nickname, &input.phone))
            .await?;

        if pending_email.is_none() {
            tracing::info!(user_id = %user.user_id, "Settings updated");
            return Ok(SettingsOutcome::Saved);
        }

        tracing::info!(user_id = %user.user_id, "Settings updated, email verification sent");
        Ok(SettingsOutcome::VerificationSent)
    }

    /// Replace any outstanding link with a fresh one and mail it
    async fn send_verification(&self, user: &User, email: &Email) -> AccountResult<()> {
        self.token_repo.delete_all_for_user(&user.user_id).await?;
        let (token, raw) = EmailVerificationToken::issue(
            user.user_id,
            email.clone(),
            self.config.email_verification_ttl(),
        );
        self.token_repo.create(&token).await?;

        let link = self.config.token_link("/account/verify-email", raw.as_str());
        let message = mail_templates::verification_email(email, &user.user_name, &link);
        if let Err(e) = self.mailer.send(&message).await {
            self.token_repo.delete(&token.token_hash).await?;
            return Err(AccountError::MailDelivery(e));
        }

        Ok(())
    }
}
