use crate::api;
use crate::api::email::{EmailSender, HttpEmailSender, LogEmailSender};
use crate::api::handlers::TriggerState;
use crate::challenge::ChallengePolicy;
use crate::cli::actions::Action;
use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tracing::warn;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            sender_email,
            max_attempts,
            code_length,
            code_ttl_seconds,
            delivery_timeout_seconds,
            email_endpoint,
        } => {
            let policy = ChallengePolicy::new(sender_email)
                .with_max_attempts(max_attempts)
                .with_code_length(code_length)
                .with_code_ttl_seconds(code_ttl_seconds)
                .with_delivery_timeout_seconds(delivery_timeout_seconds)
                .normalize();

            let sender: Arc<dyn EmailSender> = match email_endpoint {
                Some(endpoint) => Arc::new(HttpEmailSender::new(
                    &endpoint,
                    Duration::from_secs(delivery_timeout_seconds.max(1)),
                )?),
                None => {
                    warn!("no email endpoint configured, one-time codes are logged only");
                    Arc::new(LogEmailSender)
                }
            };

            api::new(port, TriggerState::new(policy, sender)).await?;
        }
    }

    Ok(())
}
