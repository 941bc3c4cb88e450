//! Shared state for the trigger endpoints.

use std::sync::Arc;

use crate::api::email::EmailSender;
use crate::challenge::ChallengePolicy;

pub struct TriggerState {
    policy: ChallengePolicy,
    sender: Arc<dyn EmailSender>,
}

impl TriggerState {
    #[must_use]
    pub fn new(policy: ChallengePolicy, sender: Arc<dyn EmailSender>) -> Self {
        Self {
            policy: policy.normalize(),
            sender,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &ChallengePolicy {
        &self.policy
    }

    pub(crate) fn sender(&self) -> Arc<dyn EmailSender> {
        Arc::clone(&self.sender)
    }
}
