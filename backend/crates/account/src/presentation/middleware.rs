//! Session Middleware
//!
//! Guards protected routes. A valid session cookie puts an
//! [`AuthenticatedUser`] into the request extensions; anything else is
//! redirected to the login page.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AccountConfig;
use crate::domain::repository::{SessionRepository, UserGroupRepository, UserRepository};
use crate::error::AccountError;

pub const LOGIN_PATH: &str = "/account/login";

/// Middleware state
#[derive(Clone)]
pub struct SessionGuardState<R>
where
    R: UserRepository + SessionRepository + UserGroupRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
}

/// Middleware that requires a valid login session
pub async fn require_session<R>(
    State(state): State<SessionGuardState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + SessionRepository + UserGroupRepository + Clone + Send + Sync + 'static,
{
    let Some(token) =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name)
    else {
        tracing::debug!(path = %req.uri().path(), "No session cookie");
        return Err(Redirect::to(LOGIN_PATH).into_response());
    };

    let use_case = CheckSessionUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    match use_case.execute(&token).await {
        Ok(viewer) => {
            req.extensions_mut().insert(viewer);
            Ok(next.run(req).await)
        }
        Err(AccountError::SessionInvalid) => {
            tracing::warn!(path = %req.uri().path(), "Invalid session");
            Err(Redirect::to(LOGIN_PATH).into_response())
        }
        Err(e) => Err(e.into_response()),
    }
}
