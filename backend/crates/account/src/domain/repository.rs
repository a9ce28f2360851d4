//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Every lookup ignores soft-deleted rows and every `delete*` flips
//! `is_deleted` instead of removing the row.

use crate::domain::entity::{
    EmailVerificationToken, PasswordResetToken, Session, User, UserDetails, UserGroup,
};
use crate::domain::value_object::{Email, SessionId, TokenHash, UserGroupId, UserId};
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A lost race on the unique user name yields
    /// `AccountError::UserNameTaken`.
    async fn create(&self, user: &User) -> AccountResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    /// Lookup by lowercase canonical user name
    async fn find_by_user_name(&self, canonical: &str) -> AccountResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Whether another active user holds the canonical name
    async fn exists_by_user_name(
        &self,
        canonical: &str,
        except: Option<&UserId>,
    ) -> AccountResult<bool>;

    /// Whether another active user holds the address
    async fn exists_by_email(&self, email: &Email, except: Option<&UserId>)
    -> AccountResult<bool>;

    /// Persist name, email, verification flag and password hash
    async fn update(&self, user: &User) -> AccountResult<()>;
}

/// User group repository trait
#[trait_variant::make(UserGroupRepository: Send)]
pub trait LocalUserGroupRepository {
    async fn find_by_id(&self, id: UserGroupId) -> AccountResult<Option<UserGroup>>;

    async fn list(&self) -> AccountResult<Vec<UserGroup>>;

    /// Insert unless a row with the same id exists. Returns whether a row
    /// was written.
    async fn insert_if_missing(&self, group: &UserGroup) -> AccountResult<bool>;
}

/// User details repository trait
#[trait_variant::make(UserDetailsRepository: Send)]
pub trait LocalUserDetailsRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AccountResult<Option<UserDetails>>;

    /// Insert or overwrite (reviving a soft-deleted row)
    async fn upsert(&self, details: &UserDetails) -> AccountResult<()>;
}

/// Login session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn create(&self, session: &Session) -> AccountResult<()>;

    async fn find_by_id(&self, session_id: &SessionId) -> AccountResult<Option<Session>>;

    async fn delete(&self, session_id: &SessionId) -> AccountResult<()>;

    async fn delete_all_for_user(&self, user_id: &UserId) -> AccountResult<u64>;
}

/// Password reset token repository trait
#[trait_variant::make(PasswordResetTokenRepository: Send)]
pub trait LocalPasswordResetTokenRepository {
    async fn create(&self, token: &PasswordResetToken) -> AccountResult<()>;

    async fn find_by_hash(&self, hash: &TokenHash) -> AccountResult<Option<PasswordResetToken>>;

    /// Soft-delete an active token. Returns false when it was already gone.
    async fn delete(&self, hash: &TokenHash) -> AccountResult<bool>;

    async fn delete_all_for_user(&self, user_id: &UserId) -> AccountResult<u64>;
}

/// Email verification token repository trait
#[trait_variant::make(EmailVerificationTokenRepository: Send)]
pub trait LocalEmailVerificationTokenRepository {
    async fn create(&self, token: &EmailVerificationToken) -> AccountResult<()>;

    async fn find_by_hash(
        &self,
        hash: &TokenHash,
    ) -> AccountResult<Option<EmailVerificationToken>>;

    /// Soft-delete an active token. Returns false when it was already gone.
    async fn delete(&self, hash: &TokenHash) -> AccountResult<bool>;

    async fn delete_all_for_user(&self, user_id: &UserId) -> AccountResult<u64>;
}

/// Every account repository at once, as the HTTP layer needs it
pub trait AccountRepository:
    UserRepository
    + UserGroupRepository
    + UserDetailsRepository
    + SessionRepository
    + PasswordResetTokenRepository
    + EmailVerificationTokenRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AccountRepository for T where
    T: UserRepository
        + UserGroupRepository
        + UserDetailsRepository
        + SessionRepository
        + PasswordResetTokenRepository
        + EmailVerificationTokenRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
