//! Admin panel use case

use std::sync::Arc;

use account::domain::entity::AuthenticatedUser;

use crate::domain::entities::{GroupSummary, ManagedUser};
use crate::domain::policy::ensure_administrator;
use crate::domain::repository::UserAdminRepository;
use crate::error::AdminResult;

#[derive(Debug)]
pub struct AdminPanel {
    pub users: Vec<ManagedUser>,
    pub groups: Vec<GroupSummary>,
}

pub struct AdminPanelUseCase<A>
where
    A: UserAdminRepository,
{
    repo: Arc<A>,
}

impl<A> AdminPanelUseCase<A>
where
    A: UserAdminRepository,
{
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, viewer: &AuthenticatedUser) -> AdminResult<AdminPanel> {
        ensure_administrator(viewer)?;

        let users = self.repo.list_users().await?;
        let groups = self.repo.list_groups().await?;

        Ok(AdminPanel { users, groups })
    }
}
