//! # Sesamo (Passwordless Email Authentication)
//!
//! `sesamo` implements passwordless sign-in: a user supplies an email
//! address, receives a one-time code, and submits that code to finish
//! authenticating. No password is ever set or stored.
//!
//! ## Challenge protocol
//!
//! The heart of the service is a three-stage custom challenge protocol
//! driven by an external identity provider:
//!
//! - **Define** ([`challenge::define`]) decides, from the ordered history of
//!   prior rounds, whether to issue another challenge, succeed the session,
//!   or fail it.
//! - **Issue** ([`challenge::issue`]) generates a fresh one-time code from a
//!   CSPRNG and delivers it through the email collaborator. A failed
//!   delivery fails the round, never silently.
//! - **Verify** ([`challenge::verify`]) compares the submitted answer
//!   against the round's secret in constant time and rejects consumed or
//!   expired rounds.
//!
//! The provider re-invokes the define step with the full prior-round list
//! after every round, so the decision function is pure and idempotent.
//!
//! ## Collaborators
//!
//! The user directory, the email transport, and the client UI stay outside
//! the core behind narrow seams: [`api::directory::Directory`],
//! [`api::email::EmailSender`], and the phase machine in [`client`]. Session
//! state is owned by the identity provider and handed to the trigger
//! endpoints on every call; `sesamo` persists nothing.

pub mod api;
pub mod challenge;
pub mod cli;
pub mod client;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
