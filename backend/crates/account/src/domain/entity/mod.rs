//! Domain Entities

pub mod authenticated;
pub mod session;
pub mod token;
pub mod user;
pub mod user_details;
pub mod user_group;

pub use authenticated::AuthenticatedUser;
pub use session::Session;
pub use token::{EmailVerificationToken, PasswordResetToken};
pub use user::User;
pub use user_details::UserDetails;
pub use user_group::UserGroup;
