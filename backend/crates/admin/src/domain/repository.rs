//! Repository Trait

use account::domain::value_object::{PublicId, UserGroupId, UserId};

use crate::domain::entities::{GroupSummary, ManagedUser};
use crate::error::AdminResult;

/// User management repository trait
#[trait_variant::make(UserAdminRepository: Send)]
pub trait LocalUserAdminRepository {
    /// Non-deleted users, oldest first
    async fn list_users(&self) -> AdminResult<Vec<ManagedUser>>;

    async fn list_groups(&self) -> AdminResult<Vec<GroupSummary>>;

    async fn find_user(&self, public_id: &PublicId) -> AdminResult<Option<ManagedUser>>;

    /// Lookup by canonical user name
    async fn find_user_by_name(&self, canonical: &str) -> AdminResult<Option<ManagedUser>>;

    async fn find_group(&self, id: UserGroupId) -> AdminResult<Option<GroupSummary>>;

    /// Move `target` into `group`. The member count of the group being
    /// left and the update happen atomically, so the group-change policy
    /// holds under concurrent requests.
    async fn change_group(&self, target: &ManagedUser, group: &GroupSummary) -> AdminResult<()>;

    /// Soft-delete the user with their sessions, details and tokens
    async fn soft_delete_user(&self, user_id: &UserId) -> AdminResult<()>;
}
