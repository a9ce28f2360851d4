//! User Name Value Object
//!
//! The handle a user signs in with and is shown as.
//!
//! ## Rules
//! - NFKC-normalized and trimmed before validation
//! - 3 to 32 characters
//! - ASCII letters, digits, `_`, `.` and `-` only
//! - Case is preserved for display; uniqueness uses the lowercase canonical form

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

pub const USER_NAME_MIN_LENGTH: usize = 3;

pub const USER_NAME_MAX_LENGTH: usize = 32;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username is required")]
    Empty,

    #[error("Username must be between {min} and {max} characters")]
    Length { length: usize, min: usize, max: usize },

    #[error("Username may only contain letters, digits, '_', '.' and '-' (found '{char}')")]
    InvalidCharacter { char: char, position: usize },
}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated, normalized user name
///
/// # Storage
/// - `original`: trimmed, NFKC normalized, case preserved (`users.user_name`)
/// - `canonical`: lowercase form (`users.user_name_canonical`, unique)
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = Self::normalize_original(input.as_ref());
        Self::validate(&original)?;
        let canonical = original.to_ascii_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_ascii_lowercase(),
        }
    }

    /// Canonical form of arbitrary input, for lookups that must not fail
    /// validation (e.g. a login identifier).
    pub fn canonicalize(input: &str) -> String {
        Self::normalize_original(input).to_ascii_lowercase()
    }

    fn normalize_original(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    fn validate(original: &str) -> Result<(), UserNameError> {
        if original.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = original.chars().count();
        if !(USER_NAME_MIN_LENGTH..=USER_NAME_MAX_LENGTH).contains(&length) {
            return Err(UserNameError::Length {
                length,
                min: USER_NAME_MIN_LENGTH,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some((position, char)) = original
            .chars()
            .enumerate()
            .find(|(_, c)| !Self::is_valid_char(*c))
        {
            return Err(UserNameError::InvalidCharacter { char, position });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.original
    }
}
