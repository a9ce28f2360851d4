//! Admin Backend Module
//!
//! User management for members of the Administrator group.
//!
//! Clean Architecture structure:
//! - `domain/` - Read models, policy, repository trait
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, forms, pages, router
//!
//! ## Security Model
//! - Every route sits behind the account session guard
//! - Authorization is the viewer's group display name, checked per request
//! - Members of the `admin` group cannot be deleted, and the last one
//!   cannot be demoted
//! - Deleting a user soft-deletes their sessions, details and tokens in
//!   the same transaction

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::PromoteAdministratorUseCase;
pub use error::{AdminError, AdminResult};
pub use infra::postgres::PgAdminRepository;
pub use presentation::router::admin_router;

#[cfg(test)]
mod tests;
