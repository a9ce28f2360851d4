//! User group identifier (`user_groups.user_group_id`, SMALLINT)

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserGroupId(i16);

impl UserGroupId {
    /// Seeded `admin` group
    pub const ADMIN: Self = Self(1);
    /// Seeded `user` group, assigned at registration
    pub const USER: Self = Self(2);

    pub const fn new(id: i16) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> i16 {
        self.0
    }
}

impl Default for UserGroupId {
    fn default() -> Self {
        Self::USER
    }
}

impl fmt::Display for UserGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserGroupId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i16>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_ids() {
        assert_eq!(UserGroupId::ADMIN.value(), 1);
        assert_eq!(UserGroupId::USER.value(), 2);
        assert_eq!(UserGroupId::default(), UserGroupId::USER);
    }

    #[test]
    fn test_parse_form_value() {
        assert_eq!(" 1 ".parse::<UserGroupId>().unwrap(), UserGroupId::ADMIN);
        assert!("admin".parse::<UserGroupId>().is_err());
    }
}
