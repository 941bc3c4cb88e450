//! In-process session driver reproducing the identity provider's loop.
//!
//! The provider normally owns the session and re-invokes define after every
//! round; [`Authenticator`] runs that same pipeline against the directory
//! and email collaborators so the protocol can be embedded or exercised end
//! to end without a provider. Invocations within one session are serialized
//! by the `&mut` borrow; different sessions share nothing mutable.

use std::sync::Arc;
use tracing::debug;

use crate::api::directory::Directory;
use crate::api::email::EmailSender;

use super::define::{Decision, FailureReason, RoundResult, define};
use super::error::ChallengeError;
use super::issue::issue;
use super::policy::ChallengePolicy;
use super::session::{ChallengeRound, SessionEvent, SessionState};
use super::utils::{normalize_email, now_unix_seconds};
use super::verify::{Verification, verify};

/// One login attempt by one principal: the ordered challenge rounds, their
/// reported outcomes, and the session's position in the state machine.
pub struct AuthSession {
    email: String,
    rounds: Vec<ChallengeRound>,
    results: Vec<RoundResult>,
    state: SessionState,
}

impl AuthSession {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn rounds_issued(&self) -> u32 {
        u32::try_from(self.rounds.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&ChallengeRound> {
        self.rounds.last()
    }
}

/// Drives define -> issue -> verify rounds against the collaborators.
pub struct Authenticator {
    policy: ChallengePolicy,
    sender: Arc<dyn EmailSender>,
    directory: Arc<dyn Directory>,
}

impl Authenticator {
    #[must_use]
    pub fn new(
        policy: ChallengePolicy,
        sender: Arc<dyn EmailSender>,
        directory: Arc<dyn Directory>,
    ) -> Self {
        Self {
            policy: policy.normalize(),
            sender,
            directory,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &ChallengePolicy {
        &self.policy
    }

    /// Start a session: decide on round one and issue it.
    ///
    /// # Errors
    /// [`ChallengeError::UnverifiedPrincipal`] if the directory has not
    /// verified the address (no secret is generated, no email sent), or
    /// [`ChallengeError::DeliveryFailure`] if the first code cannot be
    /// delivered.
    pub async fn begin(&self, email: &str) -> Result<AuthSession, ChallengeError> {
        let email = normalize_email(email);
        let verified = self.directory.is_verified(&email);

        let mut session = AuthSession {
            email,
            rounds: Vec::new(),
            results: Vec::new(),
            state: SessionState::Start,
        };

        match define(&session.results, verified, &self.policy) {
            Decision::IssueNextChallenge => {
                self.issue_next(&mut session).await?;
                Ok(session)
            }
            Decision::Fail(FailureReason::UnverifiedPrincipal) => {
                session.state = session
                    .state
                    .advance(SessionEvent::PrincipalUnverified, self.policy.max_attempts());
                Err(ChallengeError::UnverifiedPrincipal {
                    email: session.email,
                })
            }
            // Unreachable with an empty history, but the decision type is total.
            Decision::Succeed | Decision::Fail(FailureReason::AttemptsExhausted) => {
                Err(ChallengeError::AttemptsExhausted {
                    attempts: session.rounds_issued(),
                })
            }
        }
    }

    /// Submit an answer for the current round and run the provider loop once
    /// more: verify, re-define, and issue the next round when told to.
    ///
    /// # Errors
    /// [`ChallengeError::AttemptsExhausted`] when the cap is reached,
    /// [`ChallengeError::DeliveryFailure`] when the next code cannot be
    /// delivered; both leave the session `Failed`. Terminal sessions return
    /// their state unchanged.
    pub async fn submit(
        &self,
        session: &mut AuthSession,
        answer: &str,
    ) -> Result<SessionState, ChallengeError> {
        if session.state.is_terminal() {
            return Ok(session.state);
        }

        let Some(round) = session.rounds.last_mut() else {
            return Ok(session.state);
        };

        let verification = verify(round, answer, now_unix_seconds(), &self.policy);
        match verification {
            Verification::Matched => {
                round.mark_consumed();
                session.results.push(RoundResult {
                    answer_correct: true,
                });
            }
            Verification::NotMatched => {
                session.results.push(RoundResult {
                    answer_correct: false,
                });
            }
        }
        debug!(
            email = %session.email,
            round = round.index(),
            matched = verification == Verification::Matched,
            "challenge answer verified"
        );

        let max_attempts = self.policy.max_attempts();
        let verified = self.directory.is_verified(&session.email);
        match define(&session.results, verified, &self.policy) {
            Decision::Succeed => {
                session.state = session.state.advance(SessionEvent::AnswerMatched, max_attempts);
                Ok(session.state)
            }
            Decision::IssueNextChallenge => {
                session.state = session
                    .state
                    .advance(SessionEvent::AnswerRejected, max_attempts);
                self.issue_next(session).await?;
                Ok(session.state)
            }
            Decision::Fail(FailureReason::AttemptsExhausted) => {
                session.state = session
                    .state
                    .advance(SessionEvent::AnswerRejected, max_attempts);
                Err(ChallengeError::AttemptsExhausted {
                    attempts: session.rounds_issued(),
                })
            }
            Decision::Fail(FailureReason::UnverifiedPrincipal) => {
                session.state = session
                    .state
                    .advance(SessionEvent::PrincipalUnverified, max_attempts);
                Err(ChallengeError::UnverifiedPrincipal {
                    email: session.email.clone(),
                })
            }
        }
    }

    async fn issue_next(&self, session: &mut AuthSession) -> Result<(), ChallengeError> {
        let round_index = session.rounds_issued().saturating_add(1);
        match issue(
            &session.email,
            round_index,
            &self.policy,
            Arc::clone(&self.sender),
        )
        .await
        {
            Ok(issued) => {
                session.rounds.push(issued.into_round());
                session.state = session
                    .state
                    .advance(SessionEvent::ChallengeIssued, self.policy.max_attempts());
                Ok(())
            }
            // A failed delivery ends the session; any earlier round's secret
            // must not stay winnable.
            Err(err) => {
                session.state = session
                    .state
                    .advance(SessionEvent::DeliveryFailed, self.policy.max_attempts());
                Err(err)
            }
        }
    }
}
