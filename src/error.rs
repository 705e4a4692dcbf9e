//! Error taxonomy for the donation client.
//!
//! DESIGN
//! ======
//! `ApiError` is the transport-level failure of the HTTP seam. The state
//! machines convert it at their boundary: the form into `SubmitError`, the
//! feed into `FetchError`. Every variant renders a message fit for inline
//! display, so callers never need to inspect the transport error directly.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Fallback shown when the service rejects a donation without a reason.
pub const ADD_REJECTED_FALLBACK: &str = "Failed to add donation";

/// Fallback shown when a request fails without a usable transport message.
pub const TRANSPORT_FALLBACK: &str = "Something went wrong. Try again.";

// =============================================================================
// API ERROR
// =============================================================================

/// Errors produced by the HTTP donation client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request could not complete (connect, timeout, body read).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("request rejected: status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// FORM ERRORS
// =============================================================================

/// A draft failed local validation. No request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Food type and quantity are required")]
    MissingRequired,

    #[error("Quantity must be a non-negative number")]
    InvalidQuantity,
}

/// The service refused the donation or the request did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SubmissionError {
    pub message: String,
}

impl From<ApiError> for SubmissionError {
    fn from(err: ApiError) -> Self {
        let message = match err {
            ApiError::Rejected { message: Some(m), .. } if !m.trim().is_empty() => m,
            ApiError::Rejected { .. } => ADD_REJECTED_FALLBACK.to_owned(),
            ApiError::Transport(m) | ApiError::Decode(m) | ApiError::HttpClientBuild(m) if !m.trim().is_empty() => m,
            _ => TRANSPORT_FALLBACK.to_owned(),
        };
        Self { message }
    }
}

/// Outcome of a refused `SubmissionForm::submit` call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Submit was called while a submission was running or after it finished.
    #[error("donation form is not accepting submissions")]
    NotEditing,
}

// =============================================================================
// FETCH ERROR
// =============================================================================

/// The donation list could not be retrieved. Prior items are kept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("could not reach donation service: {0}")]
    Transport(String),

    #[error("donation service returned status {status}")]
    Status { status: u16 },

    #[error("donation list was malformed: {0}")]
    Decode(String),
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(m) | ApiError::HttpClientBuild(m) => Self::Transport(m),
            ApiError::Rejected { status, .. } => Self::Status { status },
            ApiError::Decode(m) => Self::Decode(m),
        }
    }
}

impl FetchError {
    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599 })
    }
}

// =============================================================================
// CONFIG ERROR
// =============================================================================

/// Client configuration could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
}
