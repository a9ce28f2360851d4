//! Authorization and safety rules for admin actions

use account::domain::entity::AuthenticatedUser;

use crate::domain::entities::{GroupSummary, ManagedUser};
use crate::error::{AdminError, AdminResult};

/// The viewer's group display name must be exactly "Administrator".
pub fn ensure_administrator(viewer: &AuthenticatedUser) -> AdminResult<()> {
    if viewer.is_administrator() {
        Ok(())
    } else {
        Err(AdminError::AccessDenied)
    }
}

/// Moving a user out of the admin group must leave at least one member.
pub fn check_group_change(
    target: &ManagedUser,
    new_group: &GroupSummary,
    admin_members: i64,
) -> AdminResult<()> {
    if target.group.is_admin_group() && !new_group.is_admin_group() && admin_members <= 1 {
        return Err(AdminError::SoleAdministrator);
    }
    Ok(())
}

/// Admin group members are refused, which covers self-deletion too.
pub fn check_deletable(target: &ManagedUser) -> AdminResult<()> {
    if target.is_deletable() {
        Ok(())
    } else {
        Err(AdminError::ProtectedUser)
    }
}
