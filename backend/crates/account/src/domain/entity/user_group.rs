//! User Group Entity

use serde::Serialize;

use crate::domain::value_object::UserGroupId;

/// Display name that grants access to the admin panel
pub const ADMINISTRATOR_DISPLAY_NAME: &str = "Administrator";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub user_group_id: UserGroupId,
    pub name: String,
    pub display_name: String,
    pub description: String,
}

impl UserGroup {
    /// Rows created by `/install`
    pub fn defaults() -> Vec<UserGroup> {
        vec![
            UserGroup {
                user_group_id: UserGroupId::ADMIN,
                name: "admin".to_string(),
                display_name: ADMINISTRATOR_DISPLAY_NAME.to_string(),
                description: "Full system access with administrative privileges".to_string(),
            },
            UserGroup {
                user_group_id: UserGroupId::USER,
                name: "user".to_string(),
                display_name: "Regular User".to_string(),
                description: "Standard user with basic access permissions".to_string(),
            },
        ]
    }

    /// Authorization is an exact match on the display name.
    pub fn is_administrator(&self) -> bool {
        self.display_name == ADMINISTRATOR_DISPLAY_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let groups = UserGroup::defaults();
        assert_eq!(groups.len(), 2);
        assert!(groups[0].is_administrator());
        assert!(!groups[1].is_administrator());
        assert_eq!(groups[1].user_group_id, UserGroupId::USER);
    }

    #[test]
    fn test_administrator_match_is_exact() {
        let mut group = UserGroup::defaults().remove(0);
        group.display_name = "administrator".to_string();
        assert!(!group.is_administrator());
        group.display_name = "Administrator ".to_string();
        assert!(!group.is_administrator());
    }
}
