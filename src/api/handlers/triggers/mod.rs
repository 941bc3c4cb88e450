//! Identity-provider trigger endpoints.
//!
//! The provider invokes one endpoint per protocol event and owns the
//! session: every request carries the full prior-round history, and the
//! round secret travels back only inside provider-private parameters.

pub(crate) mod create;
pub(crate) mod define;
mod state;
pub(crate) mod types;
pub(crate) mod verify;

pub use state::TriggerState;
