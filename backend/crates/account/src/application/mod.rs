//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod forgot_password;
pub mod install;
pub mod mail_templates;
pub mod register;
pub mod reset_password;
pub mod session_token;
pub mod settings;
pub mod sign_in;
pub mod sign_out;
pub mod verify_email;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AccountConfig;
pub use forgot_password::ForgotPasswordUseCase;
pub use install::{InstallOutput, InstallUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use session_token::SessionTokenSigner;
pub use settings::{SettingsInput, SettingsOutcome, SettingsUseCase, SettingsView};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use verify_email::{VerifiedEmail, VerifyEmailUseCase};
