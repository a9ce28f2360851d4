//! Admin Read Models

use account::domain::value_object::{PublicId, UserGroupId, UserId};
use chrono::{DateTime, Utc};

/// `user_groups.name` of the seeded administrator group
pub const ADMIN_GROUP_NAME: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub id: UserGroupId,
    pub name: String,
    pub display_name: String,
}

impl GroupSummary {
    pub fn is_admin_group(&self) -> bool {
        self.name == ADMIN_GROUP_NAME
    }
}

/// A row of the user table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedUser {
    pub user_id: UserId,
    pub public_id: PublicId,
    pub user_name: String,
    pub email: Option<String>,
    pub group: GroupSummary,
    pub created_at: DateTime<Utc>,
}

impl ManagedUser {
    /// Members of the admin group are never deletable from the panel
    pub fn is_deletable(&self) -> bool {
        !self.group.is_admin_group()
    }

    pub fn email_or_dash(&self) -> &str {
        self.email.as_deref().unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: i16, name: &str) -> GroupSummary {
        GroupSummary {
            id: UserGroupId::new(id),
            name: name.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_admin_members_are_not_deletable() {
        let mut user = ManagedUser {
            user_id: UserId::new(),
            public_id: PublicId::new(),
            user_name: "alice".to_string(),
            email: None,
            group: group(1, "admin"),
            created_at: Utc::now(),
        };
        assert!(!user.is_deletable());
        assert_eq!(user.email_or_dash(), "-");

        user.group = group(2, "user");
        assert!(user.is_deletable());
    }
}
