//! Session state: challenge rounds and the per-session state machine.

use secrecy::SecretString;

/// One issued challenge round. Owned by a single session, never shared.
///
/// The secret is held as a [`SecretString`] so it is redacted from `Debug`
/// output and log lines.
#[derive(Clone, Debug)]
pub struct ChallengeRound {
    index: u32,
    secret: SecretString,
    issued_at: i64,
    consumed: bool,
}

impl ChallengeRound {
    #[must_use]
    pub fn new(index: u32, secret: SecretString, issued_at: i64) -> Self {
        Self {
            index,
            secret,
            issued_at,
            consumed: false,
        }
    }

    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
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
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Mark the round's secret as used. A consumed round never matches again.
    pub fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    #[must_use]
    pub fn is_expired(&self, now: i64, ttl_seconds: i64) -> bool {
        now > self.issued_at.saturating_add(ttl_seconds)
    }
}

/// Events that move a session through its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    ChallengeIssued,
    AnswerMatched,
    AnswerRejected,
    PrincipalUnverified,
    DeliveryFailed,
}

/// Per-session state machine.
///
/// `Succeeded` and `Failed` are terminal and absorbing: once reached, no
/// event moves the session anywhere else. The round counter in
/// `Challenging` strictly increases and never exceeds the attempt cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Start,
    Challenging(u32),
    Succeeded,
    Failed,
}

impl SessionState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Pure transition function of (state, event) -> state.
    #[must_use]
    pub fn advance(self, event: SessionEvent, max_attempts: u32) -> Self {
        match (self, event) {
            (
                Self::Start | Self::Challenging(_),
                SessionEvent::PrincipalUnverified | SessionEvent::DeliveryFailed,
            ) => Self::Failed,
            (Self::Start, SessionEvent::ChallengeIssued) => Self::Challenging(1),
            (Self::Challenging(round), SessionEvent::ChallengeIssued) => {
                Self::Challenging(round.saturating_add(1).min(max_attempts))
            }
            (Self::Challenging(_), SessionEvent::AnswerMatched) => Self::Succeeded,
            (Self::Challenging(round), SessionEvent::AnswerRejected) => {
                if round >= max_attempts {
                    Self::Failed
                } else {
                    // The next round is issued by a separate ChallengeIssued event.
                    Self::Challenging(round)
                }
            }
            (state, _) => state,
        }
    }
}
