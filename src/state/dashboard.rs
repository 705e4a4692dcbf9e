//! Donor dashboard: view selector, donation feed, and the new-donation flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounting fetches the list once and starts the feed's reload task. A
//! successful submission from the `NewDonation` view requests a reload and
//! returns to `Overview`; the created record shows up only once that reload
//! lands.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use super::feed::{DonationFeed, FeedState};
use super::stats::ImpactStats;
use super::submission::{Cancelled, Submitted, SubmissionForm};
use crate::error::{FetchError, SubmitError};
use crate::net::api::DonationApi;
use crate::net::types::{Donation, ListScope};
use crate::session::Session;

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

/// Notice rendered when the feed holds no donations.
pub const EMPTY_LIST_NOTICE: &str = "No donations yet.";

/// Active dashboard view. The form lives inside the view that shows it.
#[derive(Debug, Default)]
pub enum DashboardView {
    #[default]
    Overview,
    NewDonation(SubmissionForm),
    /// Profile editing is handled outside this crate.
    Profile,
}

impl DashboardView {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::NewDonation(_) => "newDonation",
            Self::Profile => "profile",
        }
    }
}

pub struct Dashboard {
    api: Arc<dyn DonationApi>,
    session: Session,
    feed: DonationFeed,
    view: DashboardView,
    reload_task: JoinHandle<()>,
}

impl Dashboard {
    /// Start the reload task and perform the initial fetch.
    ///
    /// A failed initial fetch does not prevent mounting; it is recorded in
    /// the feed state and available through `feed_error`.
    pub async fn mount(api: Arc<dyn DonationApi>, session: Session, scope: ListScope) -> Self {
        let feed = DonationFeed::new(api.clone(), session.clone(), scope);
        let reload_task = feed.spawn_reload_task();
        // Failure is recorded in feed state.
        let _ = feed.load().await;
        Self { api, session, feed, view: DashboardView::Overview, reload_task }
    }

    #[must_use]
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    #[must_use]
    pub fn feed(&self) -> &DonationFeed {
        &self.feed
    }

    #[must_use]
    pub fn greeting(&self) -> String {
        format!("Welcome back, {}!", self.session.display_name())
    }

    pub fn open_new_donation(&mut self) {
        if !matches!(self.view, DashboardView::NewDonation(_)) {
            self.view = DashboardView::NewDonation(SubmissionForm::new(self.api.clone(), self.session.clone()));
        }
    }

    pub fn open_profile(&mut self) {
        self.view = DashboardView::Profile;
    }

    pub fn back_to_overview(&mut self) {
        self.view = DashboardView::Overview;
    }

    /// The open donation form, if the `NewDonation` view is active.
    pub fn form_mut(&mut self) -> Option<&mut SubmissionForm> {
        match &mut self.view {
            DashboardView::NewDonation(form) => Some(form),
            _ => None,
        }
    }

    /// Submit the open form. On success, request a list reload and return
    /// to the overview; on failure, stay on the form.
    ///
    /// # Errors
    ///
    /// `NotEditing` when no form is open; otherwise whatever the form's
    /// `submit` reports.
    pub async fn submit_donation(&mut self) -> Result<Submitted, SubmitError> {
        let form = self.form_mut().ok_or(SubmitError::NotEditing)?;
        let submitted = form.submit().await?;
        info!("donation submitted; reloading list");
        self.feed.request_reload();
        self.view = DashboardView::Overview;
        Ok(submitted)
    }

    /// Drop the open form and return to the overview. Always succeeds.
    pub fn cancel_donation(&mut self) -> Cancelled {
        match std::mem::take(&mut self.view) {
            DashboardView::NewDonation(form) => form.cancel(),
            _ => Cancelled,
        }
    }

    /// Retry a failed or stale list fetch directly.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` if the service still cannot be read.
    pub async fn retry_load(&self) -> Result<(), FetchError> {
        self.feed.load().await.map(|_| ())
    }

    /// Start a fresh load, then wait for whichever load ends up newest.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` of the newest load if it failed, even when a
    /// reload task's load superseded the one started here.
    pub async fn reload_settled(&self) -> Result<(), FetchError> {
        self.feed.load().await?;
        self.feed.settled().await
    }

    pub async fn donations(&self) -> Vec<Donation> {
        self.feed.donations().await
    }

    pub async fn stats(&self) -> ImpactStats {
        self.feed.derive_stats().await
    }

    pub async fn feed_state(&self) -> FeedState {
        self.feed.snapshot().await
    }

    pub async fn feed_error(&self) -> Option<FetchError> {
        self.feed.last_error().await
    }

    /// Notice for an empty list, `None` once donations exist.
    pub async fn empty_notice(&self) -> Option<&'static str> {
        self.feed.snapshot().await.is_empty().then_some(EMPTY_LIST_NOTICE)
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.reload_task.abort();
    }
}
