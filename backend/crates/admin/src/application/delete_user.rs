//! Delete user use case

use std::sync::Arc;

use account::domain::entity::AuthenticatedUser;

use crate::application::parse_public_id;
use crate::domain::entities::ManagedUser;
use crate::domain::policy::{check_deletable, ensure_administrator};
use crate::domain::repository::UserAdminRepository;
use crate::error::{AdminError, AdminResult};

pub const USER_DELETED: &str = "User deleted successfully";

pub struct DeleteUserUseCase<A>
where
    A: UserAdminRepository,
{
    repo: Arc<A>,
}

impl<A> DeleteUserUseCase<A>
where
    A: UserAdminRepository,
{
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        viewer: &AuthenticatedUser,
        user_id: &str,
    ) -> AdminResult<ManagedUser> {
        ensure_administrator(viewer)?;

        let public_id = parse_public_id(user_id)?;
        let target = self
            .repo
            .find_user(&public_id)
            .await?
            .ok_or(AdminError::UserNotFound)?;

        check_deletable(&target)?;

        self.repo.soft_delete_user(&target.user_id).await?;

        tracing::info!(
            actor = %viewer.user.user_id,
            user_id = %target.user_id,
            "User deleted"
        );

        Ok(target)
    }
}
