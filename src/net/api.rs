//! HTTP client for the donation service.
//!
//! DESIGN
//! ======
//! `DonationApi` is the seam between the state machines and the network.
//! `HttpDonationApi` is the only production implementation; tests swap in
//! in-memory fakes. Response handling is split into pure helpers
//! (`parse_list`, `parse_created`, `rejection`) so status and body mapping
//! is testable without a socket.

use std::time::Duration;

use tracing::debug;

use super::types::{ADD_DONATION_PATH, Donation, ErrorBody, ListScope, NewDonation};
use crate::config::{ClientConfig, HttpTimeouts};
use crate::error::ApiError;

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

// =============================================================================
// SEAM
// =============================================================================

/// Operations the client needs from the donation service.
#[async_trait::async_trait]
pub trait DonationApi: Send + Sync {
    /// Create a donation. Returns the echoed record when the service sends one.
    async fn add_donation(&self, payload: &NewDonation, token: Option<&str>) -> Result<Option<Donation>, ApiError>;

    /// Fetch the full donation collection for `scope`, in service order.
    async fn list_donations(&self, scope: ListScope, token: Option<&str>) -> Result<Vec<Donation>, ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpDonationApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDonationApi {
    /// Build a client for `base_url` with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: crate::config::normalize_api_url(base_url) })
    }

    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.timeouts)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read(response: reqwest::Response) -> Result<(u16, String), ApiError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok((status, text))
    }
}

#[async_trait::async_trait]
impl DonationApi for HttpDonationApi {
    async fn add_donation(&self, payload: &NewDonation, token: Option<&str>) -> Result<Option<Donation>, ApiError> {
        let mut request = self
            .http
            .post(endpoint(&self.base_url, ADD_DONATION_PATH))
            .json(payload);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let (status, text) = Self::read(response).await?;

        if !is_success(status) {
            return Err(rejection(status, &text));
        }
        Ok(parse_created(&text))
    }

    async fn list_donations(&self, scope: ListScope, token: Option<&str>) -> Result<Vec<Donation>, ApiError> {
        let mut request = self.http.get(endpoint(&self.base_url, scope.path()));
        if scope.requires_auth() {
            if let Some(token) = token {
                request = request.bearer_auth(token);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let (status, text) = Self::read(response).await?;

        if !is_success(status) {
            return Err(rejection(status, &text));
        }
        parse_list(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn rejection(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error);
    ApiError::Rejected { status, message }
}

fn parse_list(body: &str) -> Result<Vec<Donation>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// The create echo is informational; an unrecognized shape is not an error.
fn parse_created(body: &str) -> Option<Donation> {
    match serde_json::from_str::<Donation>(body) {
        Ok(donation) => Some(donation),
        Err(e) => {
            debug!(error = %e, "add response did not echo a donation record");
            None
        }
    }
}
