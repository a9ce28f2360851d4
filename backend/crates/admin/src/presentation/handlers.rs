//! HTTP Handlers
//!
//! Every handler runs behind the session guard, so an
//! [`AuthenticatedUser`] is always in the request extensions. Actions
//! redirect back to the panel with a `success` or `error` message.

use axum::extract::{Extension, Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use account::AccountConfig;
use account::domain::entity::AuthenticatedUser;

use crate::application::{
    AdminPanelUseCase, ChangeGroupInput, ChangeGroupUseCase, DeleteUserUseCase,
    USER_DELETED, USER_GROUP_UPDATED,
};
use crate::domain::policy::ensure_administrator;
use crate::domain::repository::UserAdminRepository;
use crate::error::{AdminError, AdminResult};
use crate::presentation::dto::{AdminQuery, ChangeGroupForm, UserActionForm, admin_redirect_url};
use crate::presentation::views::{self, AdminPageView};

/// Shared state for admin handlers
#[derive(Clone)]
pub struct AdminAppState<A>
where
    A: UserAdminRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<A>,
    pub config: Arc<AccountConfig>,
}

/// Map an action result onto the panel redirect
fn redirect_with(result: AdminResult<()>, success: &str) -> Response {
    match result {
        Ok(()) => Redirect::to(&admin_redirect_url("success", success)).into_response(),
        Err(e) => error_response(e),
    }
}

/// 403 page for non-administrators, `?error=` redirect for the rest
fn error_response(err: AdminError) -> Response {
    if matches!(err, AdminError::AccessDenied) {
        return err.into_response();
    }
    err.log();
    Redirect::to(&admin_redirect_url("error", &err.public_message())).into_response()
}

/// GET /admin
pub async fn admin_page<A>(
    State(state): State<AdminAppState<A>>,
    Extension(viewer): Extension<AuthenticatedUser>,
    Query(query): Query<AdminQuery>,
) -> Response
where
    A: UserAdminRepository + Clone + Send + Sync + 'static,
{
    match AdminPanelUseCase::new(state.repo.clone()).execute(&viewer).await {
        Ok(panel) => views::admin_panel(AdminPageView {
            server_name: &state.config.server_name,
            users: &panel.users,
            groups: &panel.groups,
            success: query.success.as_deref(),
            error: query.error.as_deref(),
        })
        .into_response(),
        Err(AdminError::AccessDenied) => {
            tracing::warn!(user_id = %viewer.user.user_id, "Admin panel access denied");
            (StatusCode::FORBIDDEN, views::access_denied(&state.config.server_name)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// POST /admin (`_method=DELETE`)
pub async fn user_action<A>(
    State(state): State<AdminAppState<A>>,
    Extension(viewer): Extension<AuthenticatedUser>,
    Form(form): Form<UserActionForm>,
) -> Response
where
    A: UserAdminRepository + Clone + Send + Sync + 'static,
{
    if let Err(e) = ensure_administrator(&viewer) {
        return error_response(e);
    }
    if !form.is_delete() {
        return error_response(AdminError::InvalidRequest("Unsupported action"));
    }

    let result = DeleteUserUseCase::new(state.repo.clone())
        .execute(&viewer, &form.user_id)
        .await
        .map(|_| ());

    redirect_with(result, USER_DELETED)
}

/// POST /admin/group
pub async fn change_group<A>(
    State(state): State<AdminAppState<A>>,
    Extension(viewer): Extension<AuthenticatedUser>,
    Form(form): Form<ChangeGroupForm>,
) -> Response
where
    A: UserAdminRepository + Clone + Send + Sync + 'static,
{
    let input = ChangeGroupInput {
        user_id: form.user_id,
        user_group_id: form.user_group_id,
    };

    let result = ChangeGroupUseCase::new(state.repo.clone())
        .execute(&viewer, input)
        .await
        .map(|_| ());

    redirect_with(result, USER_GROUP_UPDATED)
}
