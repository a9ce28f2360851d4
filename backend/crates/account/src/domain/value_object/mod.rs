//! Value Objects

pub mod email;
pub mod password;
pub mod public_id;
pub mod token;
pub mod user_group_id;
pub mod user_name;

pub use email::{Email, EmailError};
pub use password::{PasswordHash, RawPassword};
pub use public_id::PublicId;
pub use token::{OpaqueToken, TokenHash, TokenPurpose};
pub use user_group_id::UserGroupId;
pub use user_name::{UserName, UserNameError};

pub use kernel::id::{SessionId, UserId};
