//! User directory collaborator.
//!
//! The directory owns the principal lifecycle; the core only asks whether an
//! address has completed sign-up confirmation. Read-only by design: the
//! protocol never creates or deletes principals.

use std::collections::HashSet;

pub trait Directory: Send + Sync {
    fn is_verified(&self, email: &str) -> bool;
}

/// Directory backed by a fixed set of verified addresses, for local dev and
/// tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    verified: HashSet<String>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn with_verified<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verified: emails.into_iter().map(Into::into).collect(),
        }
    }
}

impl Directory for InMemoryDirectory {
    fn is_verified(&self, email: &str) -> bool {
        self.verified.contains(email)
    }
}
