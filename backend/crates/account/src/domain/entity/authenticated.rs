//! Request-scoped identity resolved from the session cookie

use crate::domain::entity::{Session, User, UserGroup};

/// Inserted into request extensions by the session guard
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub session: Session,
    pub user: User,
    pub group: UserGroup,
}

impl AuthenticatedUser {
    pub fn is_administrator(&self) -> bool {
        self.group.is_administrator()
    }
}
