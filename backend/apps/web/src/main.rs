//! Web Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are the crates'
//! own error types rendered through `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use account::{PgAccountRepository, account_router};
use admin::{AdminError, PgAdminRepository, PromoteAdministratorUseCase, admin_router};
use axum::Router;
use platform::mail::AnyMailer;
use platform::turnstile::TurnstileVerifier;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "web=info,account=info,admin=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(config = ?config, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let account_repo = PgAccountRepository::new(pool.clone());
    let admin_repo = PgAdminRepository::new(pool.clone());

    // Startup cleanup: soft-delete expired sessions and tokens
    // Errors here should not prevent server startup
    match account_repo.cleanup_expired().await {
        Ok(deleted) => {
            tracing::info!(rows_deleted = deleted, "Expired session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Expired session cleanup failed, continuing anyway");
        }
    }

    if let Some(user_name) = config.admin_user_name.as_deref() {
        bootstrap_admin(&admin_repo, user_name).await;
    }

    let mailer = AnyMailer::from_settings(
        config.resend_api_key.as_deref(),
        config.resend_from_email.as_deref(),
    )?;
    tracing::info!(transport = mailer.transport_name(), "Mailer configured");

    let captcha = TurnstileVerifier::from_keys(
        config.turnstile_site_key.clone(),
        config.turnstile_secret_key.clone(),
    );
    if captcha.is_none() {
        tracing::info!("Turnstile keys not set, captcha disabled");
    }

    let account_config = config.account_config();

    // Build router
    let app = Router::new()
        .merge(account_router(
            account_repo.clone(),
            mailer,
            captcha,
            account_config.clone(),
        ))
        .nest(
            "/admin",
            admin_router(account_repo, admin_repo, account_config),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Move the configured user into the admin group. Failures only log.
async fn bootstrap_admin(repo: &PgAdminRepository, user_name: &str) {
    let use_case = PromoteAdministratorUseCase::new(Arc::new(repo.clone()));
    match use_case.execute(user_name).await {
        Ok(true) => tracing::info!(user_name = user_name, "Administrator bootstrapped"),
        Ok(false) => tracing::debug!(user_name = user_name, "Already an administrator"),
        Err(AdminError::UserNotFound) => {
            tracing::warn!(user_name = user_name, "IM_ADMIN_USERNAME does not match any user")
        }
        Err(e) => tracing::warn!(error = %e, "Administrator bootstrap failed"),
    }
}
