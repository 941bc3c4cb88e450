//! ChallengeDefiner: decide the next step of an authentication session.
//!
//! The identity provider replays the full prior-round history on every
//! invocation, so the decision is a pure function over an explicit ordered
//! list. Same history in, same decision out; no counters, no side effects.

use super::policy::ChallengePolicy;

/// Outcome of one completed challenge round as the provider reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub answer_correct: bool,
}

/// Why a session is failed before or instead of issuing another round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// Principal must finish sign-up confirmation out of band first.
    UnverifiedPrincipal,
    /// The configured attempt cap was reached without a correct answer.
    AttemptsExhausted,
}

/// Decision returned to the identity provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    IssueNextChallenge,
    Succeed,
    Fail(FailureReason),
}

/// Decide whether to issue another round, succeed, or fail the session.
///
/// Policy order matters:
/// 1. unverified principals fail before any code is issued;
/// 2. a matched most-recent round succeeds the session;
/// 3. the attempt cap fails it, capping brute-force guessing;
/// 4. otherwise a new round is issued.
#[must_use]
pub fn define(prior_rounds: &[RoundResult], verified: bool, policy: &ChallengePolicy) -> Decision {
    if !verified {
        return Decision::Fail(FailureReason::UnverifiedPrincipal);
    }

    if prior_rounds.last().is_some_and(|round| round.answer_correct) {
        return Decision::Succeed;
    }

    let issued = u32::try_from(prior_rounds.len()).unwrap_or(u32::MAX);
    if issued >= policy.max_attempts() {
        return Decision::Fail(FailureReason::AttemptsExhausted);
    }

    Decision::IssueNextChallenge
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ChallengePolicy {
        ChallengePolicy::new("no-reply@sesamo.dev".to_string())
    }

    fn rounds(outcomes: &[bool]) -> Vec<RoundResult> {
        outcomes
            .iter()
            .map(|&answer_correct| RoundResult { answer_correct })
            .collect()
    }

    #[test]
    fn fresh_session_issues_first_round() {
        assert_eq!(define(&[], true, &policy()), Decision::IssueNextChallenge);
    }

    #[test]
    fn unverified_principal_fails_before_any_round() {
        assert_eq!(
            define(&[], false, &policy()),
            Decision::Fail(FailureReason::UnverifiedPrincipal)
        );
    }

    #[test]
    fn unverified_takes_precedence_over_matched_round() {
        assert_eq!(
            define(&rounds(&[true]), false, &policy()),
            Decision::Fail(FailureReason::UnverifiedPrincipal)
        );
    }

    #[test]
    fn matched_last_round_succeeds() {
        assert_eq!(define(&rounds(&[true]), true, &policy()), Decision::Succeed);
        assert_eq!(
            define(&rounds(&[false, true]), true, &policy()),
            Decision::Succeed
        );
    }

    #[test]
    fn match_on_final_attempt_still_succeeds() {
        assert_eq!(
            define(&rounds(&[false, false, true]), true, &policy()),
            Decision::Succeed
        );
    }

    #[test]
    fn wrong_answers_below_cap_issue_next_round() {
        assert_eq!(
            define(&rounds(&[false]), true, &policy()),
            Decision::IssueNextChallenge
        );
        assert_eq!(
            define(&rounds(&[false, false]), true, &policy()),
            Decision::IssueNextChallenge
        );
    }

    #[test]
    fn cap_reached_fails() {
        assert_eq!(
            define(&rounds(&[false, false, false]), true, &policy()),
            Decision::Fail(FailureReason::AttemptsExhausted)
        );
    }

    #[test]
    fn cap_respects_configured_max() {
        let policy = policy().with_max_attempts(1);
        assert_eq!(
            define(&rounds(&[false]), true, &policy),
            Decision::Fail(FailureReason::AttemptsExhausted)
        );
    }

    #[test]
    fn decision_is_idempotent_over_same_history() {
        let history = rounds(&[false, false]);
        let first = define(&history, true, &policy());
        let second = define(&history, true, &policy());
        assert_eq!(first, second);
    }
}
