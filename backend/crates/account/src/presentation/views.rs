//! Account pages

use maud::{Markup, html};
use platform::html::{
    Alert, Card, InputField, Page, SITE_NAME, SubmitButton, TurnstileWidget, flash, heading,
};

const LINK: &str = "text-blue-600 hover:text-blue-500 font-medium";
const SECONDARY_BUTTON: &str = "inline-flex items-center justify-center px-6 py-3 border border-gray-300 text-base font-medium rounded-lg text-gray-700 bg-white hover:bg-gray-50";
const PRIMARY_BUTTON: &str = "inline-flex items-center justify-center px-6 py-3 border border-transparent text-base font-medium rounded-lg text-white bg-blue-600 hover:bg-blue-700";

pub fn home(server_name: &str) -> Page {
    Page::titled(
        server_name,
        "Home",
        html! {
            div class="text-center" {
                h1 class="text-3xl font-bold text-gray-900 mb-4" { "Welcome to " (SITE_NAME) }
                p class="text-lg text-gray-600 mb-8 max-w-2xl mx-auto" {
                    "A modern user authentication and consent flow implementation with email verification and password reset functionality."
                }
                div class="flex flex-col sm:flex-row gap-4 justify-center mb-12" {
                    a class=(PRIMARY_BUTTON) href="/account/login" { "Login" }
                    a class=(SECONDARY_BUTTON) href="/account/register" { "Register" }
                }
            }
        },
    )
}

// ============================================================================
// Login / Register
// ============================================================================

#[derive(Debug, Default)]
pub struct LoginView<'a> {
    pub server_name: &'a str,
    pub success: Option<&'a str>,
    pub error: Option<&'a str>,
    pub identifier: &'a str,
    /// Offer registration under the error (unknown user)
    pub show_register_link: bool,
    pub turnstile_site_key: Option<&'a str>,
}

pub fn login(view: LoginView<'_>) -> Page {
    let error = view.error.map(|message| {
        let alert = Alert::error(message);
        if view.show_register_link {
            alert.with_action(html! {
                a class=(LINK) href="/account/register" { "Click here to register" }
            })
        } else {
            alert
        }
    });

    let content = html! {
        (heading("Sign in to your account", Some("Please enter your credentials below")))
        (flash(view.success, None))
        @if let Some(alert) = error { (alert) }
        form class="space-y-6" action="/account/login" method="POST" id="loginForm" {
            (InputField::new("identifier")
                .label("Username or Email")
                .placeholder("Enter your username or email")
                .value(view.identifier)
                .required(true)
                .autocomplete("username"))
            (InputField::new("password")
                .label("Password")
                .input_type("password")
                .placeholder("Enter your password")
                .required(true)
                .min_length(6)
                .autocomplete("current-password"))
            div class="flex items-center justify-between" {
                div class="flex items-center" {
                    input class="h-4 w-4 text-blue-600 border-gray-300 rounded" type="checkbox" id="remember" name="remember" value="1";
                    label class="ml-2 block text-sm text-gray-700" for="remember" { "Remember me" }
                }
                a class={"text-sm " (LINK)} href="/account/forgot-password" { "Forgot your password?" }
            }
            (TurnstileWidget::new(view.turnstile_site_key))
            (SubmitButton::new("Sign in"))
        }
        div class="mt-6 text-center" {
            span class="text-gray-600" { "Don't have an account? " }
            a class={"ml-1 " (LINK)} href="/account/register" { "Register here" }
        }
    };

    Page::titled(view.server_name, "Login", Card::new(content).with_max_width("max-w-4xl"))
}

pub fn register(
    server_name: &str,
    error: Option<&str>,
    turnstile_site_key: Option<&str>,
) -> Page {
    let content = html! {
        (heading("Create your account", Some("Join us today and get started")))
        (flash(None, error))
        form class="space-y-6" action="/account/register" method="POST" id="registerForm" {
            (InputField::new("username")
                .label("Username")
                .placeholder("Choose a username")
                .required(true)
                .autocomplete("username")
                .hint("This will be your unique identifier"))
            (InputField::new("password")
                .label("Password")
                .input_type("password")
                .placeholder("Create a secure password")
                .required(true)
                .min_length(6)
                .autocomplete("new-password")
                .hint("Must be at least 6 characters long"))
            div class="bg-blue-50 border border-blue-200 rounded-lg p-4" {
                h4 class="text-sm font-medium text-blue-800" { "Registration Info" }
                p class="text-sm text-blue-700 mt-1" {
                    "You can add your email address later in settings to enable password reset and other features."
                }
            }
            (TurnstileWidget::new(turnstile_site_key))
            (SubmitButton::new("Create Account"))
        }
        div class="mt-6 text-center" {
            span class="text-gray-600" { "Already have an account? " }
            a class={"ml-1 " (LINK)} href="/account/login" { "Sign in here" }
        }
    };

    Page::titled(server_name, "Register", Card::new(content).with_max_width("max-w-4xl"))
}

// ============================================================================
// Settings / Logout
// ============================================================================

#[derive(Debug, Default)]
pub struct SettingsPageView<'a> {
    pub server_name: &'a str,
    pub user_name: &'a str,
    pub email: &'a str,
    pub email_verified: bool,
    pub group_display_name: &'a str,
    pub nickname: &'a str,
    pub phone: &'a str,
    pub is_administrator: bool,
    pub success: Option<&'a str>,
    pub error: Option<&'a str>,
}

pub fn settings(view: SettingsPageView<'_>) -> Page {
    let has_email = !view.email.is_empty();

    let content = html! {
        (heading("Account Settings", Some("Manage your profile and account preferences")))
        (flash(view.success, view.error))
        form class="space-y-5" action="/account/setting" method="POST" {
            (InputField::new("username").label("Username").value(view.user_name).required(true))
            div {
                label class="block text-sm font-medium text-gray-700 mb-2" { "User Group" }
                div class="px-3 py-2 bg-gray-50 border border-gray-300 rounded-lg text-gray-700" {
                    span { (view.group_display_name) }
                }
                p class="text-xs text-gray-500 mt-1" { "Your account type and permissions level" }
            }
            div {
                (InputField::new("email")
                    .label("Email")
                    .input_type("email")
                    .value(view.email)
                    .placeholder("Add your email"))
                @if has_email {
                    @if view.email_verified {
                        p class="text-xs mt-1 text-green-600" { "✓ Verified" }
                    } @else {
                        p class="text-xs mt-1 text-yellow-600" {
                            "⚠ Not verified - check your email for verification link"
                        }
                    }
                }
            }
            (InputField::new("nickname").label("Nickname").value(view.nickname).placeholder("Your display name"))
            (InputField::new("phone").label("Phone").value(view.phone).placeholder("Your phone number"))
            (SubmitButton::new("Update Settings"))
        }
        @if has_email && !view.email_verified {
            div class="bg-yellow-50 border border-yellow-200 rounded-lg p-4 mt-6" {
                h4 class="text-sm font-medium text-yellow-800" { "Warning" }
                p class="text-sm text-yellow-700 mt-1" {
                    "Your email address is not verified. Some features may be limited until you verify your email."
                }
            }
        }
        div class="mt-8 flex justify-center gap-4" {
            @if view.is_administrator {
                a class=(SECONDARY_BUTTON) href="/admin" { "Admin Panel" }
            }
            a class=(SECONDARY_BUTTON) href="/account/logout" { "Log out" }
        }
    };

    Page::titled(view.server_name, "Account Settings", Card::new(content).with_max_width("max-w-lg"))
}

pub fn logout_success(server_name: &str) -> Page {
    let content = html! {
        div class="text-center" {
            h2 class="text-2xl font-bold text-gray-900 mb-2" { "Logout Successful!" }
            p class="text-gray-600 mb-8" { "You have been logged out successfully." }
            div class="flex flex-col gap-3" {
                a class=(PRIMARY_BUTTON) href="/account/login" { "Sign in again" }
                a class=(SECONDARY_BUTTON) href="/" { "Back to home" }
            }
        }
    };

    Page::titled(server_name, "Logged Out", Card::new(content))
}

// ============================================================================
// Mailed links
// ============================================================================

/// Outcome page of `/account/verify-email`
pub fn verify_email(server_name: &str, result: Result<&str, &str>) -> Page {
    let (title, alert) = match result {
        Ok(message) => ("Email Verified!", Alert::success(message)),
        Err(message) => ("Verification Failed", Alert::error(message)),
    };

    let content = html! {
        (heading(title, None))
        (alert)
        div class="text-center" {
            a class=(PRIMARY_BUTTON) href="/account/setting" { "Go to Settings" }
        }
    };

    Page::titled(server_name, title, Card::new(content))
}

pub fn forgot_password(server_name: &str, success: Option<&str>, error: Option<&str>) -> Page {
    let content = html! {
        (heading("Forgot Password", Some("We'll send you a reset link")))
        @if let Some(message) = success {
            (Alert::success(message).with_action(html! {
                a class=(LINK) href="/account/login" { "Back to login" }
            }))
        }
        (flash(None, error))
        form class="space-y-6" action="/account/forgot-password" method="POST" {
            (InputField::new("identifier")
                .label("Username or Email")
                .placeholder("Enter username or email")
                .required(true))
            (SubmitButton::new("Send Reset Link"))
        }
        div class="mt-6 text-center space-y-2" {
            div { a class=(LINK) href="/account/login" { "Back to login" } }
            div {
                span class="text-gray-600" { "Don't have an account? " }
                a class=(LINK) href="/account/register" { "Register here" }
            }
        }
    };

    Page::titled(server_name, "Forgot Password", Card::new(content))
}

/// Reset form. Without a usable token only the error and a new-link
/// prompt are shown.
pub fn reset_password(server_name: &str, token: Option<&str>, error: Option<&str>) -> Page {
    let content = html! {
        (heading("Reset Password", Some("Enter your new password below")))
        @if let Some(message) = error {
            @if token.is_some() {
                (Alert::error(message))
            } @else {
                (Alert::error(message).with_action(html! {
                    a class=(LINK) href="/account/forgot-password" { "Request a new reset link" }
                }))
            }
        }
        @if let Some(token) = token {
            (reset_form(token))
        } @else if error.is_none() {
            (Alert::error("Invalid reset link"))
        }
        div class="mt-6 text-center" {
            a class=(LINK) href="/account/login" { "Back to login" }
        }
    };

    Page::titled(server_name, "Reset Password", Card::new(content))
}

fn reset_form(token: &str) -> Markup {
    html! {
        form class="space-y-6" action="/account/reset-password" method="POST" {
            (InputField::new("token").input_type("hidden").value(token))
            (InputField::new("password")
                .label("New Password")
                .input_type("password")
                .placeholder("Enter new password")
                .required(true)
                .min_length(6)
                .autocomplete("new-password"))
            (InputField::new("confirmPassword")
                .label("Confirm Password")
                .input_type("password")
                .placeholder("Confirm new password")
                .required(true)
                .min_length(6)
                .autocomplete("new-password"))
            div class="bg-blue-50 border border-blue-200 rounded-lg p-4" {
                h4 class="text-sm font-medium text-blue-800" { "Password Requirements:" }
                ul class="text-sm text-blue-700 mt-1 list-disc list-inside" {
                    li { "At least 6 characters long" }
                    li { "Make sure both passwords match" }
                }
            }
            (SubmitButton::new("Reset Password"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maud::Render;

    #[test]
    fn test_login_register_link_only_for_unknown_user() {
        let page = login(LoginView {
            error: Some("User not found. Please register first."),
            show_register_link: true,
            ..Default::default()
        })
        .render()
        .into_string();
        assert!(page.contains("Click here to register"));

        let page = login(LoginView {
            error: Some("Invalid password. Please try again."),
            ..Default::default()
        })
        .render()
        .into_string();
        assert!(!page.contains("Click here to register"));
    }

    #[test]
    fn test_titles_carry_server_name() {
        let page = login(LoginView {
            server_name: "id.example.com",
            ..Default::default()
        })
        .render()
        .into_string();
        assert!(page.contains("<title>id.example.com - Login</title>"));

        let page = home("id.example.com").render().into_string();
        assert!(page.contains("<title>id.example.com - Home</title>"));
    }

    #[test]
    fn test_login_prefills_identifier() {
        let page = login(LoginView {
            identifier: "alice",
            ..Default::default()
        })
        .render()
        .into_string();
        assert!(page.contains("value=\"alice\""));
    }

    #[test]
    fn test_settings_admin_link() {
        let view = || SettingsPageView {
            user_name: "alice",
            group_display_name: "Administrator",
            is_administrator: true,
            ..Default::default()
        };
        assert!(settings(view()).render().into_string().contains("href=\"/admin\""));

        let page = settings(SettingsPageView {
            is_administrator: false,
            ..view()
        })
        .render()
        .into_string();
        assert!(!page.contains("href=\"/admin\""));
    }

    #[test]
    fn test_settings_unverified_email_hint() {
        let page = settings(SettingsPageView {
            email: "a@example.com",
            email_verified: false,
            ..Default::default()
        })
        .render()
        .into_string();
        assert!(page.contains("Not verified"));
    }

    #[test]
    fn test_reset_password_without_token_hides_form() {
        let page = reset_password("localhost", None, Some("Invalid reset link."))
            .render()
            .into_string();
        assert!(!page.contains("confirmPassword"));

        let page = reset_password("localhost", Some("tok"), None).render().into_string();
        assert!(page.contains("name=\"confirmPassword\""));
        assert!(page.contains("value=\"tok\""));
    }
}
