//! The custom challenge protocol: define, issue, verify.
//!
//! Three stateless functions form a pipeline driven by the identity
//! provider's authentication session. The provider serializes invocations
//! within a session, so nothing here locks; across sessions the only shared
//! resource is the OS random source, which is safe for concurrent use.
//!
//! All failures are terminal for a session: the client starts a new session
//! rather than resuming. Retry and lockout policy live exclusively in the
//! define step; issue and verify never retry on their own.

pub(crate) mod define;
mod error;
pub(crate) mod flow;
pub(crate) mod issue;
mod policy;
pub(crate) mod session;
mod utils;
pub(crate) mod verify;

pub use define::{Decision, FailureReason, RoundResult, define};
pub use error::ChallengeError;
pub use flow::{AuthSession, Authenticator};
pub use issue::{IssuedChallenge, issue};
pub use policy::ChallengePolicy;
pub use session::{ChallengeRound, SessionEvent, SessionState};
pub use utils::{normalize_email, valid_email};
pub(crate) use utils::now_unix_seconds;
pub use verify::{Verification, verify};
