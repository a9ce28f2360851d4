//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::SessionId;
use crate::error::AccountResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Sign out from current session
    pub async fn execute(&self, session_id: &SessionId) -> AccountResult<()> {
        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");
        Ok(())
    }
}
