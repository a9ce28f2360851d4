//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    Email, PasswordHash, PublicId, UserGroupId, UserId, UserName,
};

/// A row of `users` that is not soft-deleted
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub public_id: PublicId,
    pub user_name: UserName,
    /// Verified address, or the legacy unverified one. A pending change
    /// lives in `email_verification_tokens` until it is confirmed.
    pub email: Option<Email>,
    pub email_verified: bool,
    pub password_hash: PasswordHash,
    pub user_group_id: UserGroupId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New member of the regular user group
    pub fn new(user_name: UserName, password_hash: PasswordHash) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            public_id: PublicId::new(),
            user_name,
            email: None,
            email_verified: false,
            password_hash,
            user_group_id: UserGroupId::USER,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_user_name(&mut self, user_name: UserName) {
        self.user_name = user_name;
        self.updated_at = Utc::now();
    }

    /// Apply an address proven by a verification link
    pub fn confirm_email(&mut self, email: Email) {
        self.email = Some(email);
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    pub fn clear_email(&mut self) {
        self.email = None;
        self.email_verified = false;
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Whether `email` is already this user's address
    pub fn has_email(&self, email: &Email) -> bool {
        self.email.as_ref() == Some(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::RawPassword;

    fn user() -> User {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        User::new(
            UserName::new("alice").unwrap(),
            PasswordHash::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = user();
        assert_eq!(user.user_group_id, UserGroupId::USER);
        assert!(user.email.is_none());
        assert!(!user.email_verified);
    }

    #[test]
    fn test_confirm_and_clear_email() {
        let mut user = user();
        let email = Email::new("alice@example.com").unwrap();

        user.confirm_email(email.clone());
        assert!(user.has_email(&email));
        assert!(user.email_verified);

        user.clear_email();
        assert!(user.email.is_none());
        assert!(!user.email_verified);
    }
}
