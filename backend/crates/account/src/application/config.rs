//! Application Configuration
//!
//! Configuration for the account application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// HMAC key for session cookies (32 bytes)
    pub session_secret: [u8; 32],
    /// Session TTL without "Remember Me" (1 day)
    pub session_ttl_short: Duration,
    /// Session TTL with "Remember Me" (30 days)
    pub session_ttl_long: Duration,
    /// Password reset link lifetime (1 hour)
    pub password_reset_ttl: Duration,
    /// Email verification link lifetime (24 hours)
    pub email_verification_ttl: Duration,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Origin used in mailed links, without trailing slash
    pub base_url: String,
    /// Shown in page titles
    pub server_name: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "sessionId".to_string(),
            session_secret: [0u8; 32],
            session_ttl_short: Duration::from_secs(24 * 3600),
            session_ttl_long: Duration::from_secs(30 * 24 * 3600),
            password_reset_ttl: Duration::from_secs(3600),
            email_verification_ttl: Duration::from_secs(24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            base_url: "http://localhost:3000".to_string(),
            server_name: "localhost".to_string(),
        }
    }
}

impl AccountConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session lifetime for the "remember me" choice
    pub fn session_ttl(&self, remember_me: bool) -> chrono::Duration {
        to_chrono(if remember_me {
            self.session_ttl_long
        } else {
            self.session_ttl_short
        })
    }

    pub fn password_reset_ttl(&self) -> chrono::Duration {
        to_chrono(self.password_reset_ttl)
    }

    pub fn email_verification_ttl(&self) -> chrono::Duration {
        to_chrono(self.email_verification_ttl)
    }

    /// Session cookie attributes without Max-Age
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }

    /// Session cookie whose Max-Age matches the session row
    pub fn session_cookie(&self, remember_me: bool) -> CookieConfig {
        self.cookie()
            .with_max_age(self.session_ttl(remember_me).num_seconds())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Absolute link for a mailed token, e.g. `/account/verify-email`
    pub fn token_link(&self, path: &str, token: &str) -> String {
        format!("{}{}?token={}", self.base_url.trim_end_matches('/'), path, token)
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AccountConfig::default();
        assert_eq!(config.session_cookie_name, "sessionId");
        assert_eq!(config.session_ttl(false), chrono::Duration::days(1));
        assert_eq!(config.session_ttl(true), chrono::Duration::days(30));
        assert_eq!(config.password_reset_ttl(), chrono::Duration::hours(1));
        assert_eq!(config.email_verification_ttl(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_development_cookie_is_not_secure() {
        let config = AccountConfig::development();
        assert!(!config.cookie_secure);
        assert_ne!(config.session_secret, [0u8; 32]);

        let cookie = config.session_cookie(true).build_set_cookie("x");
        assert!(cookie.contains("Max-Age=2592000"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_token_link() {
        let config = AccountConfig {
            base_url: "https://id.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.token_link("/account/reset-password", "abc"),
            "https://id.example.com/account/reset-password?token=abc"
        );
    }
}
