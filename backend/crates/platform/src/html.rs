//! HTML layout and form components
//!
//! Every page is a [`Page`] wrapping a [`Card`]; the building blocks below
//! keep Tailwind classes in one place.

use maud::{DOCTYPE, Markup, PreEscaped, Render, html};

pub const SITE_NAME: &str = "Auth System";

const TAILWIND_CONFIG: &str = r#"
tailwind.config = {
  theme: { extend: { fontFamily: { sans: ['Inter', 'system-ui', 'sans-serif'] } } }
}
"#;

// ============================================================================
// Layout
// ============================================================================

pub struct Page {
    pub title: String,
    pub content: Markup,
}

impl Page {
    pub fn new(title: impl Into<String>, content: impl Render) -> Self {
        Self {
            title: title.into(),
            content: content.render(),
        }
    }

    /// Page titled `"{server_name} - {title}"`
    pub fn titled(server_name: &str, title: &str, content: impl Render) -> Self {
        Self::new(format!("{} - {}", server_name, title), content)
    }
}

impl Render for Page {
    fn render(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) }
                    script src="https://cdn.tailwindcss.com" {}
                    link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap" rel="stylesheet";
                    script { (PreEscaped(TAILWIND_CONFIG)) }
                }
                body class="bg-gray-50 min-h-screen font-sans" {
                    div class="min-h-screen flex flex-col" {
                        header class="bg-white shadow-sm border-b border-gray-200" {
                            div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8" {
                                div class="flex justify-between items-center h-16" {
                                    h1 class="text-xl font-bold text-gray-900" { (SITE_NAME) }
                                    nav class="hidden md:flex space-x-8" {
                                        a class="text-gray-600 hover:text-gray-900 transition-colors" href="/" { "Home" }
                                    }
                                }
                            }
                        }

                        main class="flex-1 flex items-center justify-center py-12 px-4 sm:px-6 lg:px-8" {
                            div class="w-full space-y-8" {
                                (self.content)
                            }
                        }

                        footer class="bg-white border-t border-gray-200 py-8" {
                            div class="text-center text-sm text-gray-500" {
                                p { "© 2025 " (SITE_NAME) ". All rights reserved." }
                            }
                        }
                    }
                }
            }
        }
    }
}

impl axum::response::IntoResponse for Page {
    fn into_response(self) -> axum::response::Response {
        self.render().into_response()
    }
}

pub struct Card {
    pub content: Markup,
    pub max_width: Option<String>,
}

impl Card {
    pub fn new(content: impl Render) -> Self {
        Self {
            content: content.render(),
            max_width: None,
        }
    }

    pub fn with_max_width(mut self, max_width: &str) -> Self {
        self.max_width = Some(max_width.to_string());
        self
    }
}

impl Render for Card {
    fn render(&self) -> Markup {
        let width_class = self.max_width.as_deref().unwrap_or("max-w-md");

        html! {
            div class={"bg-white shadow-lg rounded-lg p-8 w-full mx-auto " (width_class)} {
                (self.content)
            }
        }
    }
}

/// Card heading with an optional subtitle
pub fn heading(title: &str, subtitle: Option<&str>) -> Markup {
    html! {
        div class="text-center mb-8" {
            h2 class="text-2xl font-bold text-gray-900" { (title) }
            @if let Some(subtitle) = subtitle {
                p class="text-gray-600 mt-2" { (subtitle) }
            }
        }
    }
}

// ============================================================================
// Feedback
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub action: Option<Markup>,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
            action: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
            action: None,
        }
    }

    /// Extra line under the message, e.g. a register link
    pub fn with_action(mut self, action: impl Render) -> Self {
        self.action = Some(action.render());
        self
    }
}

impl Render for Alert {
    fn render(&self) -> Markup {
        let (frame, text) = match self.kind {
            AlertKind::Success => ("bg-green-50 border-green-200", "text-green-800"),
            AlertKind::Error => ("bg-red-50 border-red-200", "text-red-800"),
        };

        html! {
            div class={"border rounded-lg p-4 mb-6 " (frame)} role="alert" {
                span class={"font-medium " (text)} { (self.message) }
                @if let Some(action) = &self.action {
                    div class="mt-2" { (action) }
                }
            }
        }
    }
}

/// Success and error alerts for optional query-string messages
pub fn flash(success: Option<&str>, error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = success.filter(|m| !m.is_empty()) {
            (Alert::success(message))
        }
        @if let Some(message) = error.filter(|m| !m.is_empty()) {
            (Alert::error(message))
        }
    }
}

// ============================================================================
// Forms
// ============================================================================

pub struct InputField {
    pub name: String,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub value: Option<String>,
    pub input_type: String,
    pub required: bool,
    pub autocomplete: Option<String>,
    pub min_length: Option<usize>,
    pub hint: Option<String>,
}

impl InputField {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            placeholder: None,
            value: None,
            input_type: "text".to_string(),
            required: false,
            autocomplete: None,
            min_length: None,
            hint: None,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn input_type(mut self, input_type: &str) -> Self {
        self.input_type = input_type.to_string();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn autocomplete(mut self, autocomplete: &str) -> Self {
        self.autocomplete = Some(autocomplete.to_string());
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Small grey text under the input
    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

impl Render for InputField {
    fn render(&self) -> Markup {
        if self.input_type == "hidden" {
            return html! {
                input type="hidden" name=(self.name) value=(self.value.as_deref().unwrap_or(""));
            };
        }

        html! {
            div {
                @if let Some(label) = &self.label {
                    label for=(self.name) class="block text-sm font-medium text-gray-700 mb-1" { (label) }
                }
                input
                    type=(self.input_type)
                    name=(self.name)
                    id=(self.name)
                    value=(self.value.as_deref().unwrap_or(""))
                    placeholder=(self.placeholder.as_deref().unwrap_or(""))
                    autocomplete=[self.autocomplete.as_deref()]
                    minlength=[self.min_length]
                    class="block w-full px-3 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-blue-500"
                    required[self.required];
                @if let Some(hint) = &self.hint {
                    p class="mt-1 text-sm text-gray-500" { (hint) }
                }
            }
        }
    }
}

pub struct SubmitButton {
    pub label: String,
    pub danger: bool,
}

impl SubmitButton {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            danger: false,
        }
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }
}

impl Render for SubmitButton {
    fn render(&self) -> Markup {
        let color = if self.danger {
            "bg-red-600 hover:bg-red-700 focus:ring-red-500"
        } else {
            "bg-blue-600 hover:bg-blue-700 focus:ring-blue-500"
        };

        html! {
            button type="submit"
                class={"w-full px-4 py-3 border border-transparent text-base font-medium rounded-lg text-white focus:ring-2 " (color)} {
                (self.label)
            }
        }
    }
}

/// Cloudflare Turnstile widget. Renders nothing without a site key.
pub struct TurnstileWidget<'a> {
    pub site_key: Option<&'a str>,
}

impl<'a> TurnstileWidget<'a> {
    pub fn new(site_key: Option<&'a str>) -> Self {
        Self { site_key }
    }
}

impl Render for TurnstileWidget<'_> {
    fn render(&self) -> Markup {
        html! {
            @if let Some(site_key) = self.site_key {
                div class="cf-turnstile" data-sitekey=(site_key) data-theme="light" data-size="normal" {}
                script src="https://challenges.cloudflare.com/turnstile/v0/api.js" async defer {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_layout() {
        let page = Page::new("Login", html! { p { "body" } }).render().into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Login</title>"));
        assert!(page.contains("Auth System"));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn test_page_is_an_html_response() {
        use axum::response::IntoResponse;

        let response = Page::new("Home", html! { p { "hi" } }).into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/html"));
    }

    #[test]
    fn test_titled_page() {
        let page = Page::titled("id.example.com", "Login", html! {});
        assert_eq!(page.title, "id.example.com - Login");
    }

    #[test]
    fn test_alert_escapes_message() {
        let html = Alert::error("<script>x</script>").render().into_string();
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("text-red-800"));
    }

    #[test]
    fn test_alert_action_line() {
        let html = Alert::error("User not found. Please register first.")
            .with_action(html! { a href="/account/register" { "Click here to register" } })
            .render()
            .into_string();
        assert!(html.contains("href=\"/account/register\""));
    }

    #[test]
    fn test_flash_skips_empty_messages() {
        assert!(flash(None, Some("")).into_string().is_empty());
        assert!(flash(Some("Saved"), None).into_string().contains("Saved"));
    }

    #[test]
    fn test_input_field() {
        let html = InputField::new("password")
            .label("Password")
            .input_type("password")
            .min_length(6)
            .required(true)
            .render()
            .into_string();
        assert!(html.contains("type=\"password\""));
        assert!(html.contains("minlength=\"6\""));
        assert!(html.contains("required"));
        assert!(!html.contains("autocomplete"));
    }

    #[test]
    fn test_hidden_input_has_no_label() {
        let html = InputField::new("token")
            .label("Token")
            .input_type("hidden")
            .value("abc")
            .render()
            .into_string();
        assert!(html.contains("value=\"abc\""));
        assert!(!html.contains("<label"));
    }

    #[test]
    fn test_turnstile_widget_optional() {
        assert!(TurnstileWidget::new(None).render().into_string().is_empty());
        let html = TurnstileWidget::new(Some("0x4AAA")).render().into_string();
        assert!(html.contains("data-sitekey=\"0x4AAA\""));
    }
}
