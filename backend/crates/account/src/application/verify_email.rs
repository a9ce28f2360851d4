//! Verify Email Use Case
//!
//! Consumes an email verification token and applies the address.

use std::sync::Arc;

use crate::domain::repository::{EmailVerificationTokenRepository, UserRepository};
use crate::domain::value_object::{Email, TokenHash, TokenPurpose, UserId};
use crate::error::{AccountError, AccountResult};

const PURPOSE: TokenPurpose = TokenPurpose::EmailVerification;

#[derive(Debug)]
pub struct VerifiedEmail {
    pub user_id: UserId,
    pub email: Email,
}

pub struct VerifyEmailUseCase<U, E>
where
    U: UserRepository,
    E: EmailVerificationTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<E>,
}

impl<U, E> VerifyEmailUseCase<U, E>
where
    U: UserRepository,
    E: EmailVerificationTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<E>) -> Self {
        Self {
            user_repo,
            token_repo,
        }
    }

    pub async fn execute(&self, token: Option<&str>) -> AccountResult<VerifiedEmail> {
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

        if self
            .user_repo
            .exists_by_email(&row.email, Some(&row.user_id))
            .await?
        {
            return Err(AccountError::EmailInUse);
        }

        let mut user = self
            .user_repo
            .find_by_id(&row.user_id)
            .await?
            .ok_or(AccountError::TokenInvalid(PURPOSE))?;

        if !self.token_repo.delete(&hash).await? {
            return Err(AccountError::TokenInvalid(PURPOSE));
        }

        user.confirm_email(row.email.clone());
        self.user_repo.update(&user).await.map_err(|e| match e {
            AccountError::EmailTaken => AccountError::EmailInUse,
            other => other,
        })?;

        tracing::info!(user_id = %user.user_id, "Email verified");

        Ok(VerifiedEmail {
            user_id: user.user_id,
            email: row.email,
        })
    }
}
