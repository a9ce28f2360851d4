//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. The `Display` text of every
//! client-side variant is the message shown on the re-rendered form.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::mail::MailError;
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::domain::value_object::{EmailError, TokenPurpose, UserNameError};

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug, Error)]
pub enum AccountError {
    /// Form is missing required input; the message names the fields
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Captcha verification failed. Please try again.")]
    CaptchaFailed,

    #[error("{0}")]
    InvalidUserName(#[from] UserNameError),

    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username already exists")]
    UserNameTaken,

    #[error("Email already exists")]
    EmailTaken,

    /// Address claimed by someone else between issue and click
    #[error("This email address is already in use by another account.")]
    EmailInUse,

    #[error("User not found. Please register first.")]
    UserNotFound,

    #[error("Invalid password. Please try again.")]
    InvalidPassword,

    /// Cookie missing, forged, expired, or pointing at a deleted row
    #[error("Session not found or expired")]
    SessionInvalid,

    #[error("{}", .0.missing_message())]
    TokenMissing(TokenPurpose),

    #[error("{}", .0.invalid_message())]
    TokenInvalid(TokenPurpose),

    #[error("{}", .0.expired_message())]
    TokenExpired(TokenPurpose),

    #[error("Failed to send verification email. Please try again.")]
    MailDelivery(#[source] MailError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// HTTP status used when the form is re-rendered
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AccountError::MailDelivery(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::MissingFields(_)
            | AccountError::CaptchaFailed
            | AccountError::InvalidUserName(_)
            | AccountError::InvalidEmail(_)
            | AccountError::PasswordPolicy(_)
            | AccountError::PasswordMismatch
            | AccountError::TokenMissing(_) => ErrorKind::BadRequest,
            AccountError::UserNameTaken | AccountError::EmailTaken | AccountError::EmailInUse => {
                ErrorKind::Conflict
            }
            AccountError::UserNotFound | AccountError::TokenInvalid(_) => ErrorKind::NotFound,
            AccountError::InvalidPassword | AccountError::SessionInvalid => {
                ErrorKind::Unauthorized
            }
            AccountError::TokenExpired(_) => ErrorKind::Gone,
            AccountError::MailDelivery(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Text safe to show to the user
    pub fn public_message(&self) -> String {
        match self {
            AccountError::Database(_) | AccountError::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::MailDelivery(e) => {
                tracing::warn!(error = %e, "Mail delivery failed");
            }
            AccountError::InvalidPassword | AccountError::UserNotFound => {
                tracing::warn!(error = %self, "Failed login attempt");
            }
            AccountError::CaptchaFailed => {
                tracing::warn!("Captcha verification failed");
            }
            AccountError::SessionInvalid => {
                tracing::debug!("Invalid session");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<PasswordHashError> for AccountError {
    fn from(err: PasswordHashError) -> Self {
        AccountError::Internal(err.to_string())
    }
}
