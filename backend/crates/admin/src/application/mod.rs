//! Application Layer - Use Cases

pub mod change_group;
pub mod delete_user;
pub mod panel;
pub mod promote;

pub use change_group::{ChangeGroupInput, ChangeGroupUseCase, USER_GROUP_UPDATED};
pub use delete_user::{DeleteUserUseCase, USER_DELETED};
pub use panel::{AdminPanel, AdminPanelUseCase};
pub use promote::PromoteAdministratorUseCase;

use account::domain::value_object::PublicId;

use crate::error::{AdminError, AdminResult};

/// Form `userId` values are public ids; anything unparsable is unknown.
fn parse_public_id(raw: &str) -> AdminResult<PublicId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AdminError::InvalidRequest("User is required"));
    }
    PublicId::parse_str(raw).map_err(|_| AdminError::UserNotFound)
}
