//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::session_token::SessionTokenSigner;
use crate::domain::entity::{Session, User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{Email, RawPassword, UserId, UserName};
use crate::error::{AccountError, AccountResult};

/// Sign in input
pub struct SignInInput {
    /// User name or email
    pub identifier: String,
    pub password: String,
    /// Remember me flag
    pub remember_me: bool,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed value for the session cookie
    pub session_token: String,
    pub remember_me: bool,
    pub user_id: UserId,
}

/// Look a user up by email when the identifier contains `@`, by canonical
/// user name otherwise. Malformed input is simply "not found".
pub(crate) async fn find_user_by_identifier<U>(
    user_repo: &U,
    identifier: &str,
) -> AccountResult<Option<User>>
where
    U: UserRepository,
{
    let identifier = identifier.trim();
    if identifier.contains('@') {
        match Email::new(identifier) {
            Ok(email) => user_repo.find_by_email(&email).await,
            Err(_) => Ok(None),
        }
    } else {
        user_repo
            .find_by_user_name(&UserName::canonicalize(identifier))
            .await
    }
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AccountConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AccountConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AccountResult<SignInOutput> {
        if input.identifier.trim().is_empty() || input.password.is_empty() {
            return Err(AccountError::MissingFields(
                "Username/email and password are required",
            ));
        }

        let user = find_user_by_identifier(self.user_repo.as_ref(), &input.identifier)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        // No policy check here: accounts may predate the current policy
        let raw_password = RawPassword::for_login(input.password);
        if !user
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            tracing::warn!(user_id = %user.user_id, "Password mismatch");
            return Err(AccountError::InvalidPassword);
        }

        let session = Session::new(
            user.user_id,
            input.remember_me,
            self.config.session_ttl(input.remember_me),
        );
        self.session_repo.create(&session).await?;

        let session_token =
            SessionTokenSigner::new(self.config.session_secret).sign(&session.session_id)?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            remember_me = input.remember_me,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            remember_me: input.remember_me,
            user_id: user.user_id,
        })
    }
}
