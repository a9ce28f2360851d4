//! Admin forms and query strings

use serde::Deserialize;

pub const ADMIN_PATH: &str = "/admin";

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// POST /admin/group
#[derive(Debug, Deserialize)]
pub struct ChangeGroupForm {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(rename = "userGroupId", default)]
    pub user_group_id: String,
}

/// POST /admin. Browsers cannot send DELETE from a form, so the verb rides
/// in `_method`.
#[derive(Debug, Deserialize)]
pub struct UserActionForm {
    #[serde(rename = "_method")]
    pub method: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: String,
}

impl UserActionForm {
    pub fn is_delete(&self) -> bool {
        self.method
            .as_deref()
            .is_some_and(|method| method.eq_ignore_ascii_case("DELETE"))
    }
}

/// `/admin?success=…` or `/admin?error=…`
pub fn admin_redirect_url(key: &str, message: &str) -> String {
    match serde_urlencoded::to_string([(key, message)]) {
        Ok(query) => format!("{}?{}", ADMIN_PATH, query),
        Err(_) => ADMIN_PATH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_override() {
        let form: UserActionForm =
            serde_urlencoded::from_str("_method=delete&userId=abc").unwrap();
        assert!(form.is_delete());
        assert_eq!(form.user_id, "abc");

        let form: UserActionForm = serde_urlencoded::from_str("userId=abc").unwrap();
        assert!(!form.is_delete());
    }

    #[test]
    fn test_change_group_form_names() {
        let form: ChangeGroupForm =
            serde_urlencoded::from_str("userId=abc&userGroupId=1").unwrap();
        assert_eq!(form.user_id, "abc");
        assert_eq!(form.user_group_id, "1");
    }

    #[test]
    fn test_redirect_url_is_encoded() {
        assert_eq!(
            admin_redirect_url("success", "User deleted successfully"),
            "/admin?success=User+deleted+successfully"
        );
        assert_eq!(admin_redirect_url("error", "a&b"), "/admin?error=a%26b");
    }
}
