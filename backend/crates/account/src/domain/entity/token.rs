//! Single-use mailed tokens

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{Email, OpaqueToken, TokenHash, UserId};

/// Row of `password_reset_tokens`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetToken {
    pub token_hash: TokenHash,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Returns the row to store and the raw token to mail.
    pub fn issue(user_id: UserId, ttl: Duration) -> (Self, OpaqueToken) {
        let raw = OpaqueToken::generate();
        let now = Utc::now();
        let token = Self {
            token_hash: raw.hash(),
            user_id,
            expires_at: now + ttl,
            created_at: now,
        };
        (token, raw)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Row of `email_verification_tokens`; `email` is the address to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailVerificationToken {
    pub token_hash: TokenHash,
    pub user_id: UserId,
    pub email: Email,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl EmailVerificationToken {
    pub fn issue(user_id: UserId, email: Email, ttl: Duration) -> (Self, OpaqueToken) {
        let raw = OpaqueToken::generate();
        let now = Utc::now();
        let token = Self {
            token_hash: raw.hash(),
            user_id,
            email,
            expires_at: now + ttl,
            created_at: now,
        };
        (token, raw)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
