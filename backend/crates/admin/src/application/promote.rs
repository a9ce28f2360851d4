//! Startup promotion of a configured user to administrator

use std::sync::Arc;

use account::domain::value_object::{UserGroupId, UserName};

use crate::domain::repository::UserAdminRepository;
use crate::error::{AdminError, AdminResult};

pub struct PromoteAdministratorUseCase<A>
where
    A: UserAdminRepository,
{
    repo: Arc<A>,
}

impl<A> PromoteAdministratorUseCase<A>
where
    A: UserAdminRepository,
{
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    /// Returns `false` when the user already is an administrator.
    pub async fn execute(&self, user_name: &str) -> AdminResult<bool> {
        let canonical = UserName::canonicalize(user_name);
        let user = self
            .repo
            .find_user_by_name(&canonical)
            .await?
            .ok_or(AdminError::UserNotFound)?;

        if user.group.id == UserGroupId::ADMIN {
            return Ok(false);
        }

        let admin = self
            .repo
            .find_group(UserGroupId::ADMIN)
            .await?
            .ok_or(AdminError::GroupNotFound)?;
        self.repo.change_group(&user, &admin).await?;
        tracing::info!(user_id = %user.user_id, "User promoted to administrator");
        Ok(true)
    }
}
