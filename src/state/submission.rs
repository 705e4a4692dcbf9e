//! New-donation form state and submission.
//!
//! DESIGN
//! ======
//! The form owns its draft and a phase: `Editing` → `Submitting` → `Done`.
//! Validation runs before any network call and leaves the draft untouched.
//! A failed submission returns to `Editing` with the message kept for
//! inline display so the donor can correct and resubmit.
//!
//! The form never touches the donation list. Its caller reacts to a
//! successful `submit` by requesting a feed reload.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{SubmissionError, SubmitError, ValidationError};
use crate::net::api::DonationApi;
use crate::net::types::{Donation, NewDonation};
use crate::session::Session;

#[cfg(test)]
#[path = "submission_test.rs"]
mod submission_test;

/// Confirmation shown after the service accepts a donation.
pub const ADDED_NOTICE: &str = "Donation added successfully!";

/// Editable fields of the donation form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    FoodType,
    Quantity,
    Storage,
    Notes,
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "foodType" | "food_type" => Ok(Self::FoodType),
            "quantity" => Ok(Self::Quantity),
            "storage" => Ok(Self::Storage),
            "notes" | "description" => Ok(Self::Notes),
            other => Err(format!("unknown donation field: {other}")),
        }
    }
}

/// Unsaved form input, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DonationDraft {
    pub food_type: String,
    pub quantity: String,
    pub storage: String,
    pub notes: String,
}

impl DonationDraft {
    /// Check required fields and build the request payload.
    ///
    /// # Errors
    ///
    /// `MissingRequired` when food type trims to empty or quantity is empty;
    /// `InvalidQuantity` when quantity is not a finite non-negative number.
    pub fn to_payload(&self) -> Result<NewDonation, ValidationError> {
        let food_type = self.food_type.trim();
        if food_type.is_empty() || self.quantity.is_empty() {
            return Err(ValidationError::MissingRequired);
        }
        let quantity = parse_quantity(&self.quantity)?;

        Ok(NewDonation {
            food_type: food_type.to_owned(),
            quantity,
            storage: self.storage.trim().to_owned(),
            description: self.notes.trim().to_owned(),
        })
    }
}

fn parse_quantity(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite() && *q >= 0.0)
        .ok_or(ValidationError::InvalidQuantity)
}

/// Where the form is in its submit lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    Submitting,
    Done,
}

/// Result of an accepted submission.
#[derive(Clone, Debug, PartialEq)]
pub struct Submitted {
    pub payload: NewDonation,
    /// Record echoed by the service, when it sent one.
    pub created: Option<Donation>,
    /// Confirmation to show once the form has closed.
    pub notice: &'static str,
}

/// Signal returned by `cancel`: go back to the previous view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

/// Controller for the new-donation form.
pub struct SubmissionForm {
    api: Arc<dyn DonationApi>,
    session: Session,
    draft: DonationDraft,
    phase: SubmissionPhase,
    error: Option<String>,
    notice: Option<&'static str>,
}

impl std::fmt::Debug for SubmissionForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionForm")
            .field("draft", &self.draft)
            .field("phase", &self.phase)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl SubmissionForm {
    #[must_use]
    pub fn new(api: Arc<dyn DonationApi>, session: Session) -> Self {
        Self {
            api,
            session,
            draft: DonationDraft::default(),
            phase: SubmissionPhase::Editing,
            error: None,
            notice: None,
        }
    }

    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::FoodType => self.draft.food_type = value,
            DraftField::Quantity => self.draft.quantity = value,
            DraftField::Storage => self.draft.storage = value,
            DraftField::Notes => self.draft.notes = value,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &DonationDraft {
        &self.draft
    }

    #[must_use]
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Whether the submit button should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == SubmissionPhase::Editing
    }

    /// Inline error from the last submit attempt.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Confirmation after a successful submit.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    /// Validate the draft and send it to the donation service.
    ///
    /// # Errors
    ///
    /// `Validation` when required fields are missing or malformed (no request
    /// is sent), `Submission` when the service refuses or the request fails,
    /// `NotEditing` when called outside the `Editing` phase.
    pub async fn submit(&mut self) -> Result<Submitted, SubmitError> {
        if self.phase != SubmissionPhase::Editing {
            return Err(SubmitError::NotEditing);
        }
        self.error = None;

        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e.into());
            }
        };

        self.phase = SubmissionPhase::Submitting;
        let result = self
            .api
            .add_donation(&payload, self.session.token())
            .await;

        match result {
            Ok(created) => {
                info!(food_type = %payload.food_type, quantity = payload.quantity, "donation added");
                self.phase = SubmissionPhase::Done;
                self.notice = Some(ADDED_NOTICE);
                Ok(Submitted { payload, created, notice: ADDED_NOTICE })
            }
            Err(e) => {
                let err = SubmissionError::from(e);
                warn!(error = %err, "donation submit failed");
                self.phase = SubmissionPhase::Editing;
                self.error = Some(err.message.clone());
                Err(err.into())
            }
        }
    }

    /// Discard the draft and return to the previous view.
    #[must_use]
    pub fn cancel(self) -> Cancelled {
        Cancelled
    }
}
