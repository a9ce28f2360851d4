//! Cloudflare Turnstile verification
//!
//! Verification fails closed: a transport error, an unreadable response and
//! `success: false` all count as a failed challenge.

use std::net::IpAddr;
use std::time::Duration;

use serde::Deserialize;

pub const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
    hostname: Option<String>,
}

#[derive(Clone)]
pub struct TurnstileVerifier {
    client: reqwest::Client,
    site_key: String,
    secret_key: String,
    endpoint: String,
}

impl TurnstileVerifier {
    pub fn new(site_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            site_key: site_key.into(),
            secret_key: secret_key.into(),
            endpoint: SITEVERIFY_URL.to_string(),
        }
    }

    /// Both keys are required; a half-configured captcha stays disabled.
    pub fn from_keys(site_key: Option<String>, secret_key: Option<String>) -> Option<Self> {
        match (site_key, secret_key) {
            (Some(site), Some(secret)) if !site.is_empty() && !secret.is_empty() => {
                Some(Self::new(site, secret))
            }
            _ => None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Public key rendered into the widget
    pub fn site_key(&self) -> &str {
        &self.site_key
    }

    /// Check a `cf-turnstile-response` token with Cloudflare.
    pub async fn verify(&self, token: &str, remote_ip: Option<IpAddr>) -> bool {
        if token.is_empty() {
            tracing::warn!("Turnstile token missing");
            return false;
        }

        let remote_ip = remote_ip.map(|ip| ip.to_string());
        let mut form = vec![("secret", self.secret_key.as_str()), ("response", token)];
        if let Some(ip) = remote_ip.as_deref() {
            form.push(("remoteip", ip));
        }

        let response = match self.client.post(&self.endpoint).form(&form).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Turnstile verification request failed");
                return false;
            }
        };

        match response.json::<SiteVerifyResponse>().await {
            Ok(result) if result.success => {
                tracing::debug!(hostname = ?result.hostname, "Turnstile verification successful");
                true
            }
            Ok(result) => {
                tracing::warn!(error_codes = ?result.error_codes, "Turnstile verification failed");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Turnstile response could not be decoded");
                false
            }
        }
    }
}

impl std::fmt::Debug for TurnstileVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnstileVerifier")
            .field("site_key", &self.site_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
