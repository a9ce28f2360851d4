//! Opaque tokens mailed to users
//!
//! The raw token only ever exists in the outgoing email and the clicked
//! link. The database stores its SHA-256 digest, so a leaked table cannot
//! be replayed.

use nid::Nanoid;
use platform::crypto::sha256;
use std::fmt;

/// What a mailed token authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    PasswordReset,
    EmailVerification,
}

impl TokenPurpose {
    pub const fn missing_message(&self) -> &'static str {
        match self {
            TokenPurpose::PasswordReset => "Invalid reset link.",
            TokenPurpose::EmailVerification => "Invalid verification link.",
        }
    }

    pub const fn invalid_message(&self) -> &'static str {
        match self {
            TokenPurpose::PasswordReset => "Invalid or expired reset link.",
            TokenPurpose::EmailVerification => "Invalid or expired verification link.",
        }
    }

    pub const fn expired_message(&self) -> &'static str {
        match self {
            TokenPurpose::PasswordReset => "Reset link has expired. Please request a new one.",
            TokenPurpose::EmailVerification => {
                "Verification link has expired. Please request a new one."
            }
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenPurpose::PasswordReset => "password_reset",
            TokenPurpose::EmailVerification => "email_verification",
        })
    }
}

/// Freshly generated 32-character token
pub struct OpaqueToken(Nanoid<32>);

impl OpaqueToken {
    pub fn generate() -> Self {
        Self(Nanoid::new())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn hash(&self) -> TokenHash {
        TokenHash::of(self.as_str())
    }
}

impl fmt::Debug for OpaqueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OpaqueToken([REDACTED])")
    }
}

/// SHA-256 of a raw token; primary key of the token tables
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenHash([u8; 32]);

impl TokenHash {
    /// Hash whatever arrived in the query string or form
    pub fn of(raw: &str) -> Self {
        Self(sha256(raw.trim().as_bytes()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(bytes).ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for TokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length_and_uniqueness() {
        let a = OpaqueToken::generate();
        let b = OpaqueToken::generate();
        assert_eq!(a.as_str().len(), 32);
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_hash_matches_submitted_string() {
        let token = OpaqueToken::generate();
        assert_eq!(token.hash(), TokenHash::of(token.as_str()));
        assert_eq!(token.hash(), TokenHash::of(&format!(" {} ", token.as_str())));
        assert_ne!(token.hash(), TokenHash::of("something-else"));
    }

    #[test]
    fn test_known_digest() {
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(TokenHash::of("hello").as_bytes().to_vec(), expected);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert!(TokenHash::from_bytes(&[0u8; 31]).is_none());
        assert!(TokenHash::from_bytes(&[0u8; 32]).is_some());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = OpaqueToken::generate();
        assert!(!format!("{:?}", token).contains(token.as_str()));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            TokenPurpose::EmailVerification.expired_message(),
            "Verification link has expired. Please request a new one."
        );
        assert_eq!(TokenPurpose::PasswordReset.invalid_message(), "Invalid or expired reset link.");
    }
}
