//! Mailed link templates

use maud::{DOCTYPE, Markup, html};
use platform::mail::OutgoingEmail;

use crate::domain::value_object::{Email, UserName};

pub const VERIFICATION_SUBJECT: &str = "Verify your email address";
pub const PASSWORD_RESET_SUBJECT: &str = "Password Reset Request";

struct Template<'a> {
    title: &'a str,
    accent: &'a str,
    user_name: &'a UserName,
    intro: &'a str,
    button: &'a str,
    link: &'a str,
    expiry: &'a str,
    footer: &'a str,
}

impl Template<'_> {
    fn html(&self) -> Markup {
        let button_style = format!(
            "display:inline-block;background:{};color:white;padding:12px 30px;text-decoration:none;border-radius:5px;margin:20px 0;",
            self.accent
        );
        let header_style = format!(
            "background:{};color:white;padding:20px;text-align:center;",
            self.accent
        );

        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                }
                body style="font-family:Arial,sans-serif;line-height:1.6;color:#333;" {
                    div style="max-width:600px;margin:0 auto;padding:20px;" {
                        div style=(header_style) {
                            h1 { (self.title) }
                        }
                        div style="padding:20px;background:#f9f9f9;" {
                            h2 { "Hello " (self.user_name.original()) "!" }
                            p { (self.intro) }
                            p style="text-align:center;" {
                                a href=(self.link) style=(button_style) { (self.button) }
                            }
                            p { "If the button doesn't work, you can copy and paste this link into your browser:" }
                            p { a href=(self.link) { (self.link) } }
                            p { (self.expiry) }
                        }
                        div style="padding:20px;text-align:center;color:#666;font-size:12px;" {
                            p { (self.footer) }
                        }
                    }
                }
            }
        }
    }

    fn text(&self) -> String {
        format!(
            "Hello {}!\n\n{}\n\n{}\n\n{}\n\n{}\n",
            self.user_name, self.intro, self.link, self.expiry, self.footer
        )
    }

    fn into_email(self, to: &Email, subject: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.as_str().to_string(),
            subject: subject.to_string(),
            html: self.html().into_string(),
            text: self.text(),
        }
    }
}

/// Message carrying an `/account/verify-email` link
pub fn verification_email(to: &Email, user_name: &UserName, link: &str) -> OutgoingEmail {
    Template {
        title: "Email Verification",
        accent: "#007bff",
        user_name,
        intro: "Thank you for adding your email address. Please click the button below to verify your email:",
        button: "Verify Email",
        link,
        expiry: "This verification link will expire in 24 hours.",
        footer: "If you didn't request this verification, please ignore this email.",
    }
    .into_email(to, VERIFICATION_SUBJECT)
}

/// Message carrying an `/account/reset-password` link
pub fn password_reset_email(to: &Email, user_name: &UserName, link: &str) -> OutgoingEmail {
    Template {
        title: "Password Reset",
        accent: "#dc3545",
        user_name,
        intro: "We received a request to reset your password. Click the button below to reset it:",
        button: "Reset Password",
        link,
        expiry: "This reset link will expire in 1 hour.",
        footer: "If you didn't request this password reset, please ignore this email.",
    }
    .into_email(to, PASSWORD_RESET_SUBJECT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_email() {
        let to = Email::new("alice@example.com").unwrap();
        let name = UserName::new("Alice").unwrap();
        let link = "http://localhost:3000/account/verify-email?token=abc";

        let email = verification_email(&to, &name, link);
        assert_eq!(email.to, "alice@example.com");
        assert_eq!(email.subject, VERIFICATION_SUBJECT);
        assert!(email.html.contains("Hello Alice!"));
        assert!(email.html.contains("href=\"http://localhost:3000/account/verify-email?token=abc\""));
        assert!(email.text.contains(link));
    }

    #[test]
    fn test_password_reset_email() {
        let to = Email::new("bob@example.com").unwrap();
        let name = UserName::new("bob").unwrap();

        let email = password_reset_email(&to, &name, "http://x/account/reset-password?token=t");
        assert_eq!(email.subject, "Password Reset Request");
        assert!(email.html.contains("1 hour"));
        assert!(email.html.contains("Reset Password"));
    }
}
