//! Landing gate shown before a donor is signed in.

#[cfg(test)]
#[path = "landing_test.rs"]
mod landing_test;

use crate::session::Session;

/// Which landing panel is showing. Login and signup forms are external.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LandingView {
    #[default]
    Landing,
    Login,
    SignUp,
}

impl LandingView {
    pub fn show_login(&mut self) {
        *self = Self::Login;
    }

    pub fn show_sign_up(&mut self) {
        *self = Self::SignUp;
    }

    pub fn back(&mut self) {
        *self = Self::Landing;
    }
}

/// First screen for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    Landing(LandingView),
    Dashboard,
}

/// Signed-in donors go straight to the dashboard.
#[must_use]
pub fn entry_for(session: &Session) -> Entry {
    if session.is_authenticated() { Entry::Dashboard } else { Entry::Landing(LandingView::Landing) }
}
