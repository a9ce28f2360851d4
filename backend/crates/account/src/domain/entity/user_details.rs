//! User Details Entity
//!
//! Optional profile fields kept out of `users`.

use crate::domain::value_object::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDetails {
    pub user_id: UserId,
    pub nickname: Option<String>,
    pub phone: Option<String>,
}

impl UserDetails {
    /// Blank form values become `None`
    pub fn new(user_id: UserId, nickname: &str, phone: &str) -> Self {
        Self {
            user_id,
            nickname: non_empty(nickname),
            phone: non_empty(phone),
        }
    }

    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            nickname: None,
            phone: None,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_none() {
        let details = UserDetails::new(UserId::new(), "  ", " 555-0100 ");
        assert_eq!(details.nickname, None);
        assert_eq!(details.phone.as_deref(), Some("555-0100"));
    }
}
