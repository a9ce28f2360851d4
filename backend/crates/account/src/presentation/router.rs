//! Account Router

use axum::{Router, middleware, routing::get};
use std::sync::Arc;

use platform::mail::Mailer;
use platform::turnstile::TurnstileVerifier;

use crate::application::config::AccountConfig;
use crate::domain::repository::AccountRepository;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::{SessionGuardState, require_session};

/// Routes served at the site root: `/`, `/install` and `/account/*`
pub fn account_router<R, M>(
    repo: R,
    mailer: M,
    captcha: Option<TurnstileVerifier>,
    config: AccountConfig,
) -> Router
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);

    let state = AccountAppState {
        repo: repo.clone(),
        mailer: Arc::new(mailer),
        captcha: captcha.map(Arc::new),
        config: config.clone(),
    };
    let guard = SessionGuardState { repo, config };

    let protected = Router::new()
        .route(
            "/account/logout",
            get(handlers::logout::<R, M>).post(handlers::logout::<R, M>),
        )
        .route(
            "/account/setting",
            get(handlers::settings_page::<R, M>).post(handlers::update_settings::<R, M>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_session::<R>));

    Router::new()
        .route("/", get(handlers::home::<R, M>))
        .route("/install", get(handlers::install::<R, M>))
        .route(
            "/account/register",
            get(handlers::register_page::<R, M>).post(handlers::register::<R, M>),
        )
        .route(
            "/account/login",
            get(handlers::login_page::<R, M>).post(handlers::login::<R, M>),
        )
        .route("/account/verify-email", get(handlers::verify_email::<R, M>))
        .route(
            "/account/forgot-password",
            get(handlers::forgot_password_page::<R, M>).post(handlers::forgot_password::<R, M>),
        )
        .route(
            "/account/reset-password",
            get(handlers::reset_password_page::<R, M>).post(handlers::reset_password::<R, M>),
        )
        .merge(protected)
        .with_state(state)
}
