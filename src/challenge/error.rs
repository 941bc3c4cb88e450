//! Error taxonomy for the challenge protocol.
//!
//! An incorrect answer is not an error; it is the expected
//! [`Verification::NotMatched`](super::Verification::NotMatched) outcome
//! that drives the next round. Everything here is terminal for the session.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChallengeError {
    /// The principal has not confirmed their sign-up yet; the session routes
    /// to the out-of-band confirmation path instead of the code challenge.
    #[error("principal {email} is not verified")]
    UnverifiedPrincipal { email: String },

    /// The round cap was reached without a matching answer.
    #[error("challenge attempts exhausted after {attempts} rounds")]
    AttemptsExhausted { attempts: u32 },

    /// The email collaborator failed or timed out. Surfaced as a hard round
    /// failure so the caller never treats an undelivered code as issued.
    #[error("one-time code delivery failed")]
    DeliveryFailure {
        #[source]
        source: anyhow::Error,
    },
}
