//! Form and query payloads
//!
//! Field names follow the HTML forms. Missing fields deserialize to empty
//! strings so the use cases can report them with their own messages.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "cf-turnstile-response", default)]
    pub turnstile_response: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox value `"1"` when ticked, absent otherwise
    #[serde(default)]
    pub remember: Option<String>,
    #[serde(rename = "cf-turnstile-response", default)]
    pub turnstile_response: String,
}

impl LoginForm {
    pub fn remember_me(&self) -> bool {
        self.remember.as_deref() == Some("1")
    }
}

/// `?success=&error=&identifier=` on the login page
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub success: Option<String>,
    pub error: Option<String>,
    pub identifier: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub phone: String,
}

/// `?success=1|2` after a settings update
#[derive(Debug, Default, Deserialize)]
pub struct SettingsQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl SettingsQuery {
    pub fn success_message(&self) -> Option<&'static str> {
        match self.success.as_deref() {
            Some("1") => Some("Settings updated successfully!"),
            Some("2") => Some("Verification email sent! Please check your inbox."),
            _ => None,
        }
    }
}

/// `?token=` on mailed links
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForgotPasswordForm {
    #[serde(default)]
    pub identifier: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetPasswordForm {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "confirmPassword", default)]
    pub confirm_password: String,
}

/// `/account/login?success=...[&identifier=...]`
pub fn login_redirect_url(success: &str, identifier: Option<&str>) -> String {
    let mut params = vec![("success", success)];
    if let Some(identifier) = identifier {
        params.push(("identifier", identifier));
    }
    match serde_urlencoded::to_string(&params) {
        Ok(query) => format!("/account/login?{}", query),
        Err(_) => "/account/login".to_string(),
    }
}
