//! HTTP Handlers
//!
//! Form posts re-render their page with the error message and status on
//! failure, and redirect (303) on success.

use axum::extract::{Extension, Form, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use std::sync::Arc;

use platform::client::ClientIp;
use platform::cookie::{delete_cookie_header, set_cookie_header};
use platform::html::Page;
use platform::mail::Mailer;
use platform::turnstile::TurnstileVerifier;

use crate::application::config::AccountConfig;
use crate::application::forgot_password::RESET_LINK_SENT;
use crate::application::reset_password::RESET_SUCCESSFUL;
use crate::application::{
    ForgotPasswordUseCase, InstallUseCase, RegisterInput, RegisterUseCase, ResetPasswordInput,
    ResetPasswordUseCase, SettingsInput, SettingsUseCase, SignInInput, SignInUseCase,
    SignOutUseCase, VerifyEmailUseCase,
};
use crate::domain::entity::AuthenticatedUser;
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    ForgotPasswordForm, LoginForm, LoginQuery, RegisterForm, ResetPasswordForm, SettingsForm,
    SettingsQuery, TokenQuery, login_redirect_url,
};
use crate::presentation::views::{self, LoginView, SettingsPageView};

pub const REGISTRATION_SUCCESSFUL: &str = "Registration successful! Please log in.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const EMAIL_VERIFIED: &str = "Your email has been successfully verified!";

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R, M>
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    /// `None` when Turnstile keys are not configured
    pub captcha: Option<Arc<TurnstileVerifier>>,
    pub config: Arc<AccountConfig>,
}

impl<R, M> AccountAppState<R, M>
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    fn server_name(&self) -> &str {
        &self.config.server_name
    }

    fn turnstile_site_key(&self) -> Option<&str> {
        self.captcha.as_deref().map(TurnstileVerifier::site_key)
    }

    async fn check_captcha(&self, token: &str, client_ip: ClientIp) -> AccountResult<()> {
        match &self.captcha {
            Some(verifier) if !verifier.verify(token, client_ip.0).await => {
                Err(AccountError::CaptchaFailed)
            }
            _ => Ok(()),
        }
    }
}

/// Log the error and re-render the page with its public message
fn render_error(err: &AccountError, page: impl FnOnce(&str) -> Page) -> Response {
    err.log();
    (err.status_code(), page(&err.public_message())).into_response()
}

// ============================================================================
// Home / Install
// ============================================================================

/// GET /
pub async fn home<R, M>(State(state): State<AccountAppState<R, M>>) -> Page
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    views::home(state.server_name())
}

/// GET /install
pub async fn install<R, M>(
    State(state): State<AccountAppState<R, M>>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    let output = InstallUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(output))
}

// ============================================================================
// Register
// ============================================================================

/// GET /account/register
pub async fn register_page<R, M>(State(state): State<AccountAppState<R, M>>) -> Page
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    views::register(state.server_name(), None, state.turnstile_site_key())
}

/// POST /account/register
pub async fn register<R, M>(
    State(state): State<AccountAppState<R, M>>,
    client_ip: ClientIp,
    Form(form): Form<RegisterForm>,
) -> Response
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    let server_name = state.server_name();
    let site_key = state.turnstile_site_key();

    if let Err(e) = state
        .check_captcha(&form.turnstile_response, client_ip)
        .await
    {
        return render_error(&e, |message| {
            views::register(server_name, Some(message), site_key)
        });
    }

    let result = RegisterUseCase::new(state.repo.clone(), state.config.clone())
        .execute(RegisterInput {
            user_name: form.username,
            password: form.password,
        })
        .await;

    match result {
        Ok(output) => Redirect::to(&login_redirect_url(
            REGISTRATION_SUCCESSFUL,
            Some(&output.user_name),
        ))
        .into_response(),
        Err(e) => render_error(&e, |message| {
            views::register(server_name, Some(message), site_key)
        }),
    }
}

// ============================================================================
// Login / Logout
// ============================================================================

/// GET /account/login
pub async fn login_page<R, M>(
    State(state): State<AccountAppState<R, M>>,
    Query(query): Query<LoginQuery>,
) -> Page
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    views::login(LoginView {
        server_name: state.server_name(),
        success: query.success.as_deref(),
        error: query.error.as_deref(),
        identifier: query.identifier.as_deref().unwrap_or(""),
        show_register_link: false,
        turnstile_site_key: state.turnstile_site_key(),
    })
}

/// POST /account/login
pub async fn login<R, M>(
    State(state): State<AccountAppState<R, M>>,
    client_ip: ClientIp,
    Form(form): Form<LoginForm>,
) -> Response
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    let remember_me = form.remember_me();
    let identifier = form.identifier.clone();

    let result = match state
        .check_captcha(&form.turnstile_response, client_ip)
        .await
    {
        Ok(()) => {
            SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
                .execute(SignInInput {
                    identifier: form.identifier,
                    password: form.password,
                    remember_me,
                })
                .await
        }
        Err(e) => Err(e),
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            let show_register_link = matches!(e, AccountError::UserNotFound);
            let public = if e.is_server_error() {
                LOGIN_FAILED.to_string()
            } else {
                e.public_message()
            };
            e.log();

            let page = views::login(LoginView {
                server_name: state.server_name(),
                success: None,
                error: Some(&public),
                identifier: &identifier,
                show_register_link,
                turnstile_site_key: state.turnstile_site_key(),
            });
            return (e.status_code(), page).into_response();
        }
    };

    // Max-Age must match the session row
    let cookie = state.config.session_cookie(output.remember_me);
    match set_cookie_header(&cookie, &output.session_token) {
        Some(value) => (
            [(header::SET_COOKIE, value)],
            Redirect::to("/account/setting"),
        )
            .into_response(),
        None => AccountError::Internal("session cookie is not a valid header".to_string())
            .into_response(),
    }
}

/// GET|POST /account/logout
pub async fn logout<R, M>(
    State(state): State<AccountAppState<R, M>>,
    Extension(viewer): Extension<AuthenticatedUser>,
) -> AccountResult<Response>
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    SignOutUseCase::new(state.repo.clone())
        .execute(&viewer.session.session_id)
        .await?;

    let page = views::logout_success(state.server_name());
    Ok(match delete_cookie_header(&state.config.cookie()) {
        Some(value) => ([(header::SET_COOKIE, value)], page).into_response(),
        None => page.into_response(),
    })
}

// ============================================================================
// Settings
// ============================================================================

/// GET /account/setting
pub async fn settings_page<R, M>(
    State(state): State<AccountAppState<R, M>>,
    Extension(viewer): Extension<AuthenticatedUser>,
    Query(query): Query<SettingsQuery>,
) -> AccountResult<Page>
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    let view = settings_use_case(&state).load(&viewer).await?;

    Ok(views::settings(SettingsPageView {
        server_name: state.server_name(),
        user_name: view.user.user_name.original(),
        email: view.user.email.as_ref().map(|e| e.as_str()).unwrap_or(""),
        email_verified: view.user.email_verified,
        group_display_name: &view.group.display_name,
        nickname: view.details.nickname.as_deref().unwrap_or(""),
        phone: view.details.phone.as_deref().unwrap_or(""),
        is_administrator: view.group.is_administrator(),
        success: query.success_message(),
        error: query.error.as_deref(),
    }))
}

/// POST /account/setting
pub async fn update_settings<R, M>(
    State(state): State<AccountAppState<R, M>>,
    Extension(viewer): Extension<AuthenticatedUser>,
    Form(form): Form<SettingsForm>,
) -> Response
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    let input = SettingsInput {
        user_name: form.username.clone(),
        email: form.email.clone(),
        nickname: form.nickname.clone(),
        phone: form.phone.clone(),
    };

    match settings_use_case(&state).update(&viewer, input).await {
        Ok(outcome) => Redirect::to(&format!(
            "/account/setting?success={}",
            outcome.query_value()
        ))
        .into_response(),
        Err(e) => render_error(&e, |message| {
            views::settings(SettingsPageView {
                server_name: state.server_name(),
                user_name: &form.username,
                email: &form.email,
                email_verified: viewer.user.email_verified,
                group_display_name: &viewer.group.display_name,
                nickname: &form.nickname,
                phone: &form.phone,
                is_administrator: viewer.is_administrator(),
                success: None,
                error: Some(message),
            })
        }),
    }
}

fn settings_use_case<R, M>(state: &AccountAppState<R, M>) -> SettingsUseCase<R, R, R, M>
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    SettingsUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    )
}

// ============================================================================
// Mailed links
// ============================================================================

/// GET /account/verify-email
///
/// Link outcomes render with 200; only server failures change the status.
pub async fn verify_email<R, M>(
    State(state): State<AccountAppState<R, M>>,
    Query(query): Query<TokenQuery>,
) -> Response
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone(), state.repo.clone());

    match use_case.execute(query.token.as_deref()).await {
        Ok(_) => views::verify_email(state.server_name(), Ok(EMAIL_VERIFIED)).into_response(),
        Err(e) => {
            e.log();
            let status = if e.is_server_error() {
                e.status_code()
            } else {
                StatusCode::OK
            };
            let page = views::verify_email(state.server_name(), Err(&e.public_message()));
            (status, page).into_response()
        }
    }
}

/// GET /account/forgot-password
pub async fn forgot_password_page<R, M>(State(state): State<AccountAppState<R, M>>) -> Page
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    views::forgot_password(state.server_name(), None, None)
}

/// POST /account/forgot-password
pub async fn forgot_password<R, M>(
    State(state): State<AccountAppState<R, M>>,
    Form(form): Form<ForgotPasswordForm>,
) -> Response
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    let use_case = ForgotPasswordUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    match use_case.execute(&form.identifier).await {
        Ok(()) => {
            views::forgot_password(state.server_name(), Some(RESET_LINK_SENT), None).into_response()
        }
        Err(e) => render_error(&e, |message| {
            views::forgot_password(state.server_name(), None, Some(message))
        }),
    }
}

/// GET /account/reset-password
pub async fn reset_password_page<R, M>(
    State(state): State<AccountAppState<R, M>>,
    Query(query): Query<TokenQuery>,
) -> Response
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    match reset_password_use_case(&state)
        .validate(query.token.as_deref())
        .await
    {
        Ok(_) => {
            let token = query.token.as_deref().map(str::trim);
            views::reset_password(state.server_name(), token, None).into_response()
        }
        Err(e) => render_error(&e, |message| {
            views::reset_password(state.server_name(), None, Some(message))
        }),
    }
}

/// POST /account/reset-password
pub async fn reset_password<R, M>(
    State(state): State<AccountAppState<R, M>>,
    Form(form): Form<ResetPasswordForm>,
) -> Response
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    let token = form.token.clone();
    let input = ResetPasswordInput {
        token: form.token,
        password: form.password,
        confirm_password: form.confirm_password,
    };

    match reset_password_use_case(&state).execute(input).await {
        Ok(()) => Redirect::to(&login_redirect_url(RESET_SUCCESSFUL, None)).into_response(),
        Err(e) => {
            // A dead link cannot be retried, so the form is dropped
            let keep_form = !matches!(
                e,
                AccountError::TokenMissing(_)
                    | AccountError::TokenInvalid(_)
                    | AccountError::TokenExpired(_)
            ) && !token.trim().is_empty();

            render_error(&e, |message| {
                views::reset_password(
                    state.server_name(),
                    keep_form.then_some(token.as_str()),
                    Some(message),
                )
            })
        }
    }
}

fn reset_password_use_case<R, M>(state: &AccountAppState<R, M>) -> ResetPasswordUseCase<R, R, R>
where
    R: AccountRepository,
    M: Mailer + Clone + Sync + 'static,
{
    ResetPasswordUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    )
}
