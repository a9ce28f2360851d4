//! Admin Error Types
//!
//! Admin-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Admin-specific result type alias
pub type AdminResult<T> = Result<T, AdminError>;

#[derive(Debug, Error)]
pub enum AdminError {
    /// Viewer is signed in but not an administrator
    #[error("Access Denied")]
    AccessDenied,

    #[error("{0}")]
    InvalidRequest(&'static str),

    #[error("User not found")]
    UserNotFound,

    #[error("User group not found")]
    GroupNotFound,

    #[error("Cannot remove the only administrator")]
    SoleAdministrator,

    #[error("Administrators cannot be deleted")]
    ProtectedUser,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::AccessDenied => StatusCode::FORBIDDEN,
            AdminError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AdminError::UserNotFound | AdminError::GroupNotFound => StatusCode::NOT_FOUND,
            AdminError::SoleAdministrator | AdminError::ProtectedUser => StatusCode::CONFLICT,
            AdminError::Database(_) | AdminError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::AccessDenied => ErrorKind::Forbidden,
            AdminError::InvalidRequest(_) => ErrorKind::BadRequest,
            AdminError::UserNotFound | AdminError::GroupNotFound => ErrorKind::NotFound,
            AdminError::SoleAdministrator | AdminError::ProtectedUser => ErrorKind::Conflict,
            AdminError::Database(_) | AdminError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Text safe to put in a redirect
    pub fn public_message(&self) -> String {
        match self {
            AdminError::Database(_) | AdminError::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.public_message());
        match self {
            AdminError::AccessDenied => {
                err.with_action("Only administrators can access this panel.")
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AdminError::Database(e) => {
                tracing::error!(error = %e, "Admin database error");
            }
            AdminError::Internal(msg) => {
                tracing::error!(message = %msg, "Admin internal error");
            }
            AdminError::AccessDenied => {
                tracing::warn!("Admin access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Admin error");
            }
        }
    }
}

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AdminError::AccessDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AdminError::SoleAdministrator.status_code(), StatusCode::CONFLICT);
        assert_eq!(AdminError::UserNotFound.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_internal_details_stay_private() {
        let err = AdminError::Internal("row 42 corrupt".to_string());
        assert!(!err.public_message().contains("row 42"));
        assert_eq!(AppError::from(err).status_code(), 500);
    }

    #[test]
    fn test_access_denied_page() {
        let response = AdminError::AccessDenied.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
