//! Admin Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use account::domain::repository::AccountRepository;
use account::{AccountConfig, SessionGuardState, require_session};

use crate::domain::repository::UserAdminRepository;
use crate::presentation::handlers::{self, AdminAppState};

/// Routes for `/admin`, to be nested at that path. Sessions are checked
/// against `account_repo`.
pub fn admin_router<R, A>(account_repo: R, admin_repo: A, config: AccountConfig) -> Router
where
    R: AccountRepository,
    A: UserAdminRepository + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let guard = SessionGuardState {
        repo: Arc::new(account_repo),
        config: config.clone(),
    };
    let state = AdminAppState {
        repo: Arc::new(admin_repo),
        config,
    };

    Router::new()
        .route(
            "/",
            get(handlers::admin_page::<A>).post(handlers::user_action::<A>),
        )
        .route("/group", post(handlers::change_group::<A>))
        .route_layer(middleware::from_fn_with_state(guard, require_session::<R>))
        .with_state(state)
}
