//! Client form phases as a finite-state machine.
//!
//! The UI is a thin rendering layer: it shows the form for the current
//! phase and reports provider events back. All transitions live in
//! [`next_phase`], a pure function of (phase, event), so the client owns no
//! authentication logic.

/// The form the client renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Email entry for an existing, verified principal.
    Login,
    /// Email entry for an unknown principal.
    Signup,
    /// Out-of-band sign-up confirmation code entry.
    ConfirmSignUp,
    /// One-time sign-in code entry.
    VerifyCode,
    /// Authenticated.
    SignedIn,
}

/// Provider-driven events that move the client between phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Login attempted for an address the directory does not know.
    PrincipalUnknown,
    /// Login attempted for an address that has not confirmed sign-up.
    PrincipalUnverified,
    /// A challenge round was issued; a code is on its way.
    ChallengeIssued,
    /// Sign-up submitted; confirmation is pending.
    SignupSubmitted,
    /// Sign-up confirmation accepted.
    SignupConfirmed,
    /// The submitted one-time code matched.
    CodeAccepted,
    /// The submitted one-time code did not match (session still live).
    CodeRejected,
    /// The session ended (sign-out or terminal failure).
    SignedOut,
}

/// Pure transition function. Events that do not apply to the current phase
/// leave it unchanged.
#[must_use]
pub fn next_phase(phase: Phase, event: PhaseEvent) -> Phase {
    match (phase, event) {
        (Phase::Login, PhaseEvent::PrincipalUnknown) => Phase::Signup,
        (Phase::Login, PhaseEvent::PrincipalUnverified) => Phase::ConfirmSignUp,
        (Phase::Login, PhaseEvent::ChallengeIssued) => Phase::VerifyCode,
        (Phase::Signup, PhaseEvent::SignupSubmitted) => Phase::ConfirmSignUp,
        (Phase::ConfirmSignUp, PhaseEvent::SignupConfirmed) => Phase::SignedIn,
        (Phase::VerifyCode, PhaseEvent::CodeAccepted) => Phase::SignedIn,
        (Phase::VerifyCode, PhaseEvent::CodeRejected) => Phase::VerifyCode,
        (_, PhaseEvent::SignedOut) => Phase::Login,
        (phase, _) => phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_routes_by_principal_status() {
        assert_eq!(
            next_phase(Phase::Login, PhaseEvent::PrincipalUnknown),
            Phase::Signup
        );
        assert_eq!(
            next_phase(Phase::Login, PhaseEvent::PrincipalUnverified),
            Phase::ConfirmSignUp
        );
        assert_eq!(
            next_phase(Phase::Login, PhaseEvent::ChallengeIssued),
            Phase::VerifyCode
        );
    }

    #[test]
    fn signup_path_reaches_signed_in() {
        let phase = next_phase(Phase::Signup, PhaseEvent::SignupSubmitted);
        assert_eq!(phase, Phase::ConfirmSignUp);
        let phase = next_phase(phase, PhaseEvent::SignupConfirmed);
        assert_eq!(phase, Phase::SignedIn);
    }

    #[test]
    fn code_entry_loops_until_accepted() {
        let phase = next_phase(Phase::VerifyCode, PhaseEvent::CodeRejected);
        assert_eq!(phase, Phase::VerifyCode);
        let phase = next_phase(phase, PhaseEvent::CodeAccepted);
        assert_eq!(phase, Phase::SignedIn);
    }

    #[test]
    fn sign_out_returns_to_login_from_anywhere() {
        for phase in [
            Phase::Login,
            Phase::Signup,
            Phase::ConfirmSignUp,
            Phase::VerifyCode,
            Phase::SignedIn,
        ] {
            assert_eq!(next_phase(phase, PhaseEvent::SignedOut), Phase::Login);
        }
    }

    #[test]
    fn unrelated_events_leave_phase_unchanged() {
        assert_eq!(
            next_phase(Phase::SignedIn, PhaseEvent::CodeRejected),
            Phase::SignedIn
        );
        assert_eq!(
            next_phase(Phase::Signup, PhaseEvent::CodeAccepted),
            Phase::Signup
        );
    }
}
