//! ChallengeVerifier: constant-time comparison of the submitted answer.
//!
//! Verification carries no retry or lockout logic; the define step applies
//! policy on the next pipeline pass. Consumed rounds never match again
//! (replay protection) and expired rounds are treated as plain mismatches.

use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::policy::ChallengePolicy;
use super::session::ChallengeRound;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verification {
    Matched,
    NotMatched,
}

/// Compare both sides as SHA-256 digests so the comparison is constant-time
/// and independent of answer length.
fn digests_equal(expected: &str, answer: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let answer = Sha256::digest(answer.as_bytes());
    expected.ct_eq(&answer).into()
}

/// Verify a submitted answer against the round's secret. The comparison is
/// exact; input cleanup such as whitespace trimming belongs to the client.
#[must_use]
pub fn verify(
    round: &ChallengeRound,
    answer: &str,
    now: i64,
    policy: &ChallengePolicy,
) -> Verification {
    if round.is_consumed() {
        return Verification::NotMatched;
    }

    if round.is_expired(now, policy.code_ttl_seconds()) {
        return Verification::NotMatched;
    }

    if digests_equal(round.secret().expose_secret(), answer) {
        Verification::Matched
    } else {
        Verification::NotMatched
    }
}
