//! ChallengeIssuer: mint a fresh one-time code and deliver it by email.
//!
//! Each issuance call produces a brand-new secret, so a provider retry of
//! the same round supersedes (and thereby invalidates) any earlier code for
//! that round. The secret travels only to the email collaborator and back to
//! the caller as provider-private round metadata, never to the client.

use anyhow::anyhow;
use rand::{Rng, rngs::OsRng};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::info;

use crate::api::email::{EmailMessage, EmailSender};

use super::error::ChallengeError;
use super::policy::ChallengePolicy;
use super::session::ChallengeRound;
use super::utils::now_unix_seconds;

/// A freshly issued challenge: the secret plus its issuance metadata.
#[derive(Clone, Debug)]
pub struct IssuedChallenge {
    round_index: u32,
    secret: SecretString,
    issued_at: i64,
}

impl IssuedChallenge {
    #[must_use]
    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    #[must_use]
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    #[must_use]
    pub fn into_round(self) -> ChallengeRound {
        ChallengeRound::new(self.round_index, self.secret, self.issued_at)
    }
}

/// Generate a one-time code from the OS random source, uniform over the
/// policy charset. `OsRng` is a CSPRNG and safe to share across sessions.
/// An un-normalized policy with an empty charset falls back to the default
/// so sampling always has something to draw from.
fn generate_code(policy: &ChallengePolicy) -> SecretString {
    let mut charset: Vec<char> = policy.code_charset().chars().collect();
    if charset.is_empty() {
        charset = super::policy::DEFAULT_CODE_CHARSET.chars().collect();
    }
    let mut rng = OsRng;
    let code: String = (0..policy.code_length())
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect();
    SecretString::from(code)
}

/// Issue one challenge round: generate the code and send it to the
/// principal's address.
///
/// Delivery is bounded by the policy timeout and has a single immediate
/// failure outcome; retries are the caller's decision, never hidden here.
///
/// # Errors
/// Returns [`ChallengeError::DeliveryFailure`] if the email collaborator
/// errors or the send does not complete within the timeout. A round whose
/// code was not delivered is never reported as issued.
pub async fn issue(
    to_email: &str,
    round_index: u32,
    policy: &ChallengePolicy,
    sender: Arc<dyn EmailSender>,
) -> Result<IssuedChallenge, ChallengeError> {
    let secret = generate_code(policy);
    let issued_at = now_unix_seconds();

    let minutes = (policy.code_ttl_seconds() / 60).max(1);
    let message = EmailMessage {
        from_email: policy.sender_email().to_string(),
        to_email: to_email.to_string(),
        subject: "Your sign-in code".to_string(),
        body: format!(
            "Your one-time sign-in code is {}. It expires in {minutes} minute(s).",
            secret.expose_secret()
        ),
    };

    // The blocking task keeps running past a timeout; the sender's transport
    // carries its own deadline so it cannot outlive the round by much.
    let send = tokio::task::spawn_blocking(move || sender.send(&message));
    match tokio::time::timeout(policy.delivery_timeout(), send).await {
        Err(_elapsed) => Err(ChallengeError::DeliveryFailure {
            source: anyhow!(
                "delivery timed out after {} seconds",
                policy.delivery_timeout().as_secs()
            ),
        }),
        Ok(Err(join_error)) => Err(ChallengeError::DeliveryFailure {
            source: anyhow!(join_error),
        }),
        Ok(Ok(Err(source))) => Err(ChallengeError::DeliveryFailure { source }),
        Ok(Ok(Ok(()))) => {
            info!(to_email, round_index, "one-time code issued");
            Ok(IssuedChallenge {
                round_index,
                secret,
                issued_at,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::sync::Mutex;

    struct RecordingSender {
        messages: Mutex<Vec<EmailMessage>>,
    }

    impl RecordingSender {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                messages: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<EmailMessage> {
            self.messages.lock().map(|m| m.clone()).unwrap_or_default()
        }
    }

    impl EmailSender for RecordingSender {
        fn send(&self, message: &EmailMessage) -> Result<()> {
            if let Ok(mut messages) = self.messages.lock() {
                messages.push(message.clone());
            }
            Ok(())
        }
    }

    struct FailingSender;

    impl EmailSender for FailingSender {
        fn send(&self, _message: &EmailMessage) -> Result<()> {
            Err(anyhow!("relay unavailable"))
        }
    }

    fn policy() -> ChallengePolicy {
        ChallengePolicy::new("no-reply@sesamo.dev".to_string())
    }

    #[test]
    fn generated_code_respects_length_and_charset() {
        let policy = policy().with_code_length(8).with_code_charset("01".to_string());
        let code = generate_code(&policy);
        let code = code.expose_secret();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn empty_charset_falls_back_to_digits() {
        // An un-normalized policy must not panic the sampler.
        let policy = policy().with_code_charset(String::new());
        let code = generate_code(&policy);
        let code = code.expose_secret();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn issue_delivers_code_to_principal() -> Result<()> {
        let sender = RecordingSender::new();
        let issued = issue("alice@example.com", 1, &policy(), sender.clone()).await?;

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_email, "alice@example.com");
        assert_eq!(sent[0].from_email, "no-reply@sesamo.dev");
        assert!(sent[0].body.contains(issued.secret().expose_secret()));
        assert_eq!(issued.round_index(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn reissue_produces_a_different_secret() -> Result<()> {
        let sender = RecordingSender::new();
        let first = issue("alice@example.com", 1, &policy(), sender.clone()).await?;
        let second = issue("alice@example.com", 1, &policy(), sender.clone()).await?;

        // 6 digits collide once in a million; treat equality as failure.
        assert_ne!(
            first.secret().expose_secret(),
            second.secret().expose_secret()
        );
        assert_eq!(sender.sent().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn delivery_failure_is_a_hard_failure() {
        let result = issue("alice@example.com", 1, &policy(), Arc::new(FailingSender)).await;
        assert!(matches!(
            result,
            Err(ChallengeError::DeliveryFailure { .. })
        ));
    }

    #[tokio::test]
    async fn issued_round_carries_metadata() -> Result<()> {
        let sender = RecordingSender::new();
        let issued = issue("alice@example.com", 2, &policy(), sender).await?;
        let issued_at = issued.issued_at();
        let round = issued.into_round();
        assert_eq!(round.index(), 2);
        assert_eq!(round.issued_at(), issued_at);
        assert!(!round.is_consumed());
        Ok(())
    }
}
