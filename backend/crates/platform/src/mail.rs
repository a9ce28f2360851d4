//! Outgoing Mail
//!
//! Transport-agnostic email delivery. `ConsoleMailer` is the development
//! transport; `ResendMailer` talks to the Resend HTTP API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resend REST endpoint
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Sender used when `RESEND_FROM_EMAIL` is not configured
pub const DEFAULT_FROM_ADDRESS: &str = "noreply@resend.dev";

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    /// Plain-text alternative
    pub text: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Mail delivery trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver a single message
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

// ============================================================================
// Console transport
// ============================================================================

/// Development mailer that logs every message instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Mailer for ConsoleMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "--- EMAIL (console) ---\n{}\n--- END EMAIL ---",
            email.text
        );
        Ok(())
    }
}

// ============================================================================
// Resend transport
// ============================================================================

#[derive(Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

/// Mailer backed by the Resend API
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            from: from.into(),
            endpoint: RESEND_API_URL.to_string(),
        })
    }

    /// Point the mailer at a different endpoint (mock servers)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("from", &self.from)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let payload = ResendRequest {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let accepted: ResendResponse = response.json().await?;
        tracing::info!(
            to = %email.to,
            message_id = accepted.id.as_deref().unwrap_or("-"),
            "Email sent"
        );
        Ok(())
    }
}

// ============================================================================
// Runtime selection
// ============================================================================

/// Mailer chosen at startup from configuration
#[derive(Debug, Clone)]
pub enum AnyMailer {
    Console(ConsoleMailer),
    Resend(ResendMailer),
}

impl AnyMailer {
    /// Resend when an API key is present, console otherwise
    pub fn from_settings(api_key: Option<&str>, from: Option<&str>) -> Result<Self, MailError> {
        match api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => Ok(Self::Resend(ResendMailer::new(
                key,
                from.unwrap_or(DEFAULT_FROM_ADDRESS),
            )?)),
            None => Ok(Self::Console(ConsoleMailer::new())),
        }
    }

    pub fn transport_name(&self) -> &'static str {
        match self {
            Self::Console(_) => "console",
            Self::Resend(_) => "resend",
        }
    }
}

impl Mailer for AnyMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        match self {
            Self::Console(mailer) => Mailer::send(mailer, email).await,
            Self::Resend(mailer) => Mailer::send(mailer, email).await,
        }
    }
}
