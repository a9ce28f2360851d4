//! Check Session Use Case
//!
//! Resolves a session cookie into the signed-in user.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::session_token::SessionTokenSigner;
use crate::domain::entity::AuthenticatedUser;
use crate::domain::repository::{SessionRepository, UserGroupRepository, UserRepository};
use crate::error::{AccountError, AccountResult};

/// Check session use case
pub struct CheckSessionUseCase<U, S, G>
where
    U: UserRepository,
    S: SessionRepository,
    G: UserGroupRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    group_repo: Arc<G>,
    config: Arc<AccountConfig>,
}

impl<U, S, G> CheckSessionUseCase<U, S, G>
where
    U: UserRepository,
    S: SessionRepository,
    G: UserGroupRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        group_repo: Arc<G>,
        config: Arc<AccountConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            group_repo,
            config,
        }
    }

    pub async fn execute(&self, session_token: &str) -> AccountResult<AuthenticatedUser> {
        let session_id = SessionTokenSigner::new(self.config.session_secret)
            .verify(session_token)
            .ok_or(AccountError::SessionInvalid)?;

        let session = self
            .session_repo
            .find_by_id(&session_id)
            .await?
            .ok_or(AccountError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(&session_id).await?;
            tracing::debug!(session_id = %session_id, "Expired session removed");
            return Err(AccountError::SessionInvalid);
        }

        // Soft-deleted users are invisible to the repository
        let user = self
            .user_repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AccountError::SessionInvalid)?;

        let group = self
            .group_repo
            .find_by_id(user.user_group_id)
            .await?
            .ok_or_else(|| {
                AccountError::Internal(format!("user group {} not found", user.user_group_id))
            })?;

        Ok(AuthenticatedUser {
            session,
            user,
            group,
        })
    }
}
