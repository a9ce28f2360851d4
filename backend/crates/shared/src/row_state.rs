//! Soft-delete flag
//!
//! Every mutable table carries an `is_deleted` SMALLINT column holding
//! `0` or `1`. Rows are never removed; deleting flips the flag and bumps
//! `updated_at`, and every read filters on [`RowState::Active`].

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum RowState {
    #[default]
    Active = 0,
    Deleted = 1,
}

/// Value read from `is_deleted` was neither 0 nor 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid is_deleted flag: {0}")]
pub struct InvalidRowState(pub i16);

impl RowState {
    /// Column value to bind
    #[inline]
    pub const fn flag(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, RowState::Deleted)
    }

    pub fn from_flag(flag: i16) -> Result<Self, InvalidRowState> {
        match flag {
            0 => Ok(RowState::Active),
            1 => Ok(RowState::Deleted),
            other => Err(InvalidRowState(other)),
        }
    }
}

impl fmt::Display for RowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RowState::Active => "active",
            RowState::Deleted => "deleted",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_match_column_values() {
        assert_eq!(RowState::Active.flag(), 0);
        assert_eq!(RowState::Deleted.flag(), 1);
        assert_eq!(RowState::default(), RowState::Active);
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(RowState::from_flag(0), Ok(RowState::Active));
        assert_eq!(RowState::from_flag(1), Ok(RowState::Deleted));
        assert_eq!(RowState::from_flag(2), Err(InvalidRowState(2)));
    }
}
