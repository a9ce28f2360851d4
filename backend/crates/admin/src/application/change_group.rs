//! Change group use case

use std::sync::Arc;

use account::domain::entity::AuthenticatedUser;
use account::domain::value_object::UserGroupId;

use crate::application::parse_public_id;
use crate::domain::entities::ManagedUser;
use crate::domain::policy::ensure_administrator;
use crate::domain::repository::UserAdminRepository;
use crate::error::{AdminError, AdminResult};

pub const USER_GROUP_UPDATED: &str = "User group updated successfully";

#[derive(Debug, Default)]
pub struct ChangeGroupInput {
    /// Public id of the target user
    pub user_id: String,
    pub user_group_id: String,
}

pub struct ChangeGroupUseCase<A>
where
    A: UserAdminRepository,
{
    repo: Arc<A>,
}

impl<A> ChangeGroupUseCase<A>
where
    A: UserAdminRepository,
{
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        viewer: &AuthenticatedUser,
        input: ChangeGroupInput,
    ) -> AdminResult<ManagedUser> {
        ensure_administrator(viewer)?;

        let public_id = parse_public_id(&input.user_id)?;
        let group_id: UserGroupId = input
            .user_group_id
            .parse()
            .map_err(|_| AdminError::GroupNotFound)?;

        let mut target = self
            .repo
            .find_user(&public_id)
            .await?
            .ok_or(AdminError::UserNotFound)?;
        let group = self
            .repo
            .find_group(group_id)
            .await?
            .ok_or(AdminError::GroupNotFound)?;

        if target.group.id == group.id {
            return Ok(target);
        }

        self.repo.change_group(&target, &group).await?;

        tracing::info!(
            actor = %viewer.user.user_id,
            user_id = %target.user_id,
            from = %target.group.id,
            to = %group.id,
            "User group changed"
        );

        target.group = group;
        Ok(target)
    }
}
