//! Session context for the signed-in donor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written by an external authentication flow; this crate only reads it.
//! Passed explicitly into the dashboard and form at construction.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Display name used when the session carries none.
pub const ANONYMOUS_DONOR: &str = "Anonymous Donor";

/// Bearer credential and display name of the current donor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    full_name: Option<String>,
}

impl Session {
    /// Build a session, treating blank values as absent.
    #[must_use]
    pub fn new(token: Option<String>, full_name: Option<String>) -> Self {
        Self { token: non_blank(token), full_name: non_blank(full_name) }
    }

    /// A session with no credential.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Name shown in the dashboard greeting.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(ANONYMOUS_DONOR)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
