//! Server configuration
//!
//! Read once from the environment at startup.

use std::env;
use std::net::{IpAddr, SocketAddr};

use account::AccountConfig;
use anyhow::{Context, bail};
use platform::crypto::from_base64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub server_name: String,
    /// Origin used in mailed links
    pub mail_url: String,
    pub env: AppEnv,
    /// `None` in development means a random key per process
    pub session_secret: Option<[u8; 32]>,
    pub password_pepper: Option<String>,
    pub resend_api_key: Option<String>,
    pub resend_from_email: Option<String>,
    pub turnstile_site_key: Option<String>,
    pub turnstile_secret_key: Option<String>,
    /// Existing user moved into the admin group at startup
    pub admin_user_name: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let env = match get("APP_ENV").as_deref() {
            Some("production") => AppEnv::Production,
            _ => AppEnv::Development,
        };

        let session_secret = match get("SESSION_SECRET") {
            Some(encoded) => Some(decode_secret(&encoded)?),
            None if env == AppEnv::Production => {
                bail!("SESSION_SECRET must be set in production")
            }
            None => None,
        };

        let host = match get("IM_HOST") {
            Some(host) => host
                .parse()
                .with_context(|| format!("IM_HOST is not an IP address: {host}"))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let port = match get("IM_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("IM_PORT is not a port number: {port}"))?,
            None => 3000,
        };

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(max) => max
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {max}"))?,
            None => 5,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            server_name: get("IM_SERVER_NAME").unwrap_or_else(|| "localhost".to_string()),
            mail_url: get("IM_MAIL_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
            env,
            session_secret,
            password_pepper: get("PASSWORD_PEPPER"),
            resend_api_key: get("RESEND_API_KEY"),
            resend_from_email: get("RESEND_FROM_EMAIL"),
            turnstile_site_key: get("TURNSTILE_SITE_KEY"),
            turnstile_secret_key: get("TURNSTILE_SECRET_KEY"),
            admin_user_name: get("IM_ADMIN_USERNAME"),
        })
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnv::Production
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn account_config(&self) -> AccountConfig {
        let base = if self.is_production() {
            AccountConfig::with_random_secret()
        } else {
            AccountConfig::development()
        };

        AccountConfig {
            session_secret: self.session_secret.unwrap_or(base.session_secret),
            password_pepper: self
                .password_pepper
                .as_ref()
                .map(|pepper| pepper.as_bytes().to_vec()),
            base_url: self.mail_url.trim_end_matches('/').to_string(),
            server_name: self.server_name.clone(),
            ..base
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr())
            .field("server_name", &self.server_name)
            .field("mail_url", &self.mail_url)
            .field("env", &self.env)
            .field("session_secret", &self.session_secret.map(|_| "[REDACTED]"))
            .field("resend", &self.resend_api_key.is_some())
            .field("turnstile", &self.turnstile_site_key.is_some())
            .finish()
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = from_base64(encoded.trim()).context("SESSION_SECRET is not valid base64")?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| anyhow::anyhow!("SESSION_SECRET must be 32 bytes, got {}", bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::to_base64;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/portal")]).unwrap();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.env, AppEnv::Development);
        assert!(config.session_secret.is_none());

        let account = config.account_config();
        assert!(!account.cookie_secure);
        assert_eq!(account.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_database_url_required() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_production_requires_secret() {
        let err = config(&[("DATABASE_URL", "postgres://x"), ("APP_ENV", "production")])
            .unwrap_err();
        assert!(err.to_string().contains("SESSION_SECRET"));

        let secret = to_base64(&[7u8; 32]);
        let config = config(&[
            ("DATABASE_URL", "postgres://x"),
            ("APP_ENV", "production"),
            ("SESSION_SECRET", &secret),
            ("IM_MAIL_URL", "https://portal.example.com/"),
        ])
        .unwrap();
        let account = config.account_config();
        assert!(account.cookie_secure);
        assert_eq!(account.session_secret, [7u8; 32]);
        assert_eq!(account.base_url, "https://portal.example.com");
    }

    #[test]
    fn test_secret_length_checked() {
        let short = to_base64(&[1u8; 16]);
        let err = config(&[("DATABASE_URL", "postgres://x"), ("SESSION_SECRET", &short)])
            .unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = config(&[
            ("DATABASE_URL", "postgres://user:hunter2@db/portal"),
            ("RESEND_API_KEY", "re_secret"),
        ])
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("re_secret"));
    }
}
