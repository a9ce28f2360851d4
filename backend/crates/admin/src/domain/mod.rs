//! Domain Layer
//!
//! Admin read models, authorization policy and repository trait.

pub mod entities;
pub mod policy;
pub mod repository;

pub use entities::{ADMIN_GROUP_NAME, GroupSummary, ManagedUser};
pub use repository::UserAdminRepository;
