//! Install Use Case
//!
//! Seeds the default user groups. Safe to run repeatedly.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entity::UserGroup;
use crate::domain::repository::UserGroupRepository;
use crate::error::AccountResult;

pub const ALREADY_SEEDED: &str = "Database already seeded";
pub const SEEDED: &str = "Database seeded successfully";

/// Body of `GET /install`
#[derive(Debug, Serialize)]
pub struct InstallOutput {
    pub message: &'static str,
    pub groups: Vec<UserGroup>,
}

pub struct InstallUseCase<G>
where
    G: UserGroupRepository,
{
    group_repo: Arc<G>,
}

impl<G> InstallUseCase<G>
where
    G: UserGroupRepository,
{
    pub fn new(group_repo: Arc<G>) -> Self {
        Self { group_repo }
    }

    pub async fn execute(&self) -> AccountResult<InstallOutput> {
        let mut inserted = 0usize;
        for group in UserGroup::defaults() {
            if self.group_repo.insert_if_missing(&group).await? {
                inserted += 1;
            }
        }

        let message = if inserted == 0 {
            ALREADY_SEEDED
        } else {
            tracing::info!(inserted = inserted, "Default user groups seeded");
            SEEDED
        };

        Ok(InstallOutput {
            message,
            groups: self.group_repo.list().await?,
        })
    }
}
