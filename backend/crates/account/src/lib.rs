//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, forms, pages, router
//!
//! ## Features
//! - Registration and login with username or email
//! - Server-side sessions behind an HMAC-signed cookie
//! - Account settings with email re-verification
//! - Forgot/reset password via mailed single-use links
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Mailed tokens are stored as SHA-256 digests only
//! - Rows are soft-deleted; reads never see deleted rows
//! - Optional Cloudflare Turnstile on login and registration

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use domain::entity::AuthenticatedUser;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::middleware::{SessionGuardState, require_session};
pub use presentation::router::account_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
