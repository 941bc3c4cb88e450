//! Email delivery collaborator.
//!
//! The challenge issuer hands a fully rendered message to an `EmailSender`
//! and treats any error as a hard failure of the round. There is no queue
//! and no retry loop here: the protocol requires a single immediate outcome
//! per issuance, so retries are a caller decision.
//!
//! The default sender for local dev is `LogEmailSender`, which logs and
//! returns `Ok(())`. `HttpEmailSender` posts to an email relay endpoint
//! with a bounded client timeout.

use anyhow::{Context, Result};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Email delivery abstraction used by the challenge issuer.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error to fail the round.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the delivery instead of sending real email.
/// The envelope is logged at info; the body, which carries the one-time
/// code, only at debug so it never lands in production-level output.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            from_email = %message.from_email,
            to_email = %message.to_email,
            subject = %message.subject,
            "email send stub"
        );
        debug!(body = %message.body, "email send stub body (dev only)");
        Ok(())
    }
}

/// Sender that posts the message as JSON to an email relay endpoint.
///
/// The blocking client is invoked from `spawn_blocking` by the issuer; its
/// own timeout bounds the request independently of the issuer's deadline.
pub struct HttpEmailSender {
    client: reqwest::blocking::Client,
    endpoint: Url,
}

impl HttpEmailSender {
    /// # Errors
    /// Returns an error if the endpoint is not a valid URL or the HTTP
    /// client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).context("Invalid email relay endpoint")?;
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Failed to build email relay HTTP client")?;
        Ok(Self { client, endpoint })
    }
}

impl EmailSender for HttpEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        let payload = json!({
            "from": message.from_email,
            "to": message.to_email,
            "subject": message.subject,
            "body": message.body,
        });

        self.client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .context("Email relay request failed")?
            .error_for_status()
            .context("Email relay rejected the message")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage {
            from_email: "no-reply@sesamo.dev".to_string(),
            to_email: "alice@example.com".to_string(),
            subject: "Your sign-in code".to_string(),
            body: "Your one-time sign-in code is 123456.".to_string(),
        }
    }

    #[test]
    fn log_sender_always_succeeds() {
        assert!(LogEmailSender.send(&message()).is_ok());
    }

    #[test]
    fn http_sender_rejects_invalid_endpoint() {
        let sender = HttpEmailSender::new("not a url", Duration::from_secs(1));
        assert!(sender.is_err());
    }

    #[test]
    fn http_sender_accepts_valid_endpoint() {
        let sender = HttpEmailSender::new("https://relay.example.com/send", Duration::from_secs(1));
        assert!(sender.is_ok());
    }
}
