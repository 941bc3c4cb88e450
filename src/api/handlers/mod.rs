//! API handlers: service health and the identity-provider triggers.

pub mod health;
pub mod root;
pub mod triggers;

pub use triggers::TriggerState;
