//! Shared Kernel - vocabulary used by every bounded context
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed identifiers for users and sessions
//! - The soft-delete row flag stored on every mutable table
//!
//! Only things with one meaning across the whole portal belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod row_state;
