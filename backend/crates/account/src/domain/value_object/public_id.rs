//! PublicId Value Object
//!
//! Identifier exposed in admin forms and URLs. The internal UUID never
//! leaves the server.
//!
//! ```rust
//! use account::domain::value_object::public_id::PublicId;
//!
//! let public_id = PublicId::new();
//! assert_eq!(public_id.as_str().len(), 21);
//! ```
use std::str::FromStr;

use nid::Nanoid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicId(pub Nanoid);

impl PublicId {
    #[inline]
    pub fn new() -> Self {
        Self(Nanoid::new())
    }

    #[inline]
    pub fn parse_str(s: &str) -> Result<Self, nid::ParseError> {
        Nanoid::from_str(s).map(PublicId)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for PublicId {
    type Err = nid::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PublicId::parse_str(s)
    }
}

impl Default for PublicId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_new() {
        assert_eq!(PublicId::new().as_str().len(), 21);
        assert_ne!(PublicId::new(), PublicId::new());
    }

    #[test]
    fn test_public_id_parse_str() {
        let id_str = "0123456789abcdefghi01";
        let public_id: PublicId = id_str.parse().unwrap();
        assert_eq!(public_id.as_str(), id_str);
    }

    #[test]
    fn test_public_id_parse_str_invalid() {
        assert!(PublicId::parse_str("invalid_id!@#").is_err());
        assert!(PublicId::parse_str("").is_err());
    }
}
