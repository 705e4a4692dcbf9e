//! Wire types for the donation service.
//!
//! DESIGN
//! ======
//! Field names follow the service's JSON (`_id`, `createdAt`, snake_case
//! elsewhere). Server-assigned fields are optional on the way in so a
//! partially populated record still renders instead of failing the whole
//! list.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize, Serializer};

/// A donation record as returned by the list endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    /// Opaque unique identifier; the stable render key.
    #[serde(rename = "_id")]
    pub id: String,
    pub food_type: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub safe_till: Option<String>,
}

impl Donation {
    /// Quantity with a missing value counted as zero.
    #[must_use]
    pub fn quantity_or_zero(&self) -> f64 {
        self.quantity.unwrap_or(0.0)
    }
}

/// Body of `POST /api/food/add`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewDonation {
    pub food_type: String,
    #[serde(serialize_with = "serialize_quantity")]
    pub quantity: f64,
    pub storage: String,
    pub description: String,
}

/// Whole quantities go out as JSON integers (`5`, not `5.0`).
#[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
fn serialize_quantity<S: Serializer>(quantity: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if quantity.fract() == 0.0 && quantity.abs() <= MAX_EXACT {
        serializer.serialize_i64(*quantity as i64)
    } else {
        serializer.serialize_f64(*quantity)
    }
}

/// Error body returned with non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Which list endpoint the dashboard reads from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListScope {
    /// Every donation, unauthenticated (`/api/food/list`).
    #[default]
    All,
    /// Donations of the signed-in donor (`/api/food/my`).
    Mine,
}

impl ListScope {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::All => "/api/food/list",
            Self::Mine => "/api/food/my",
        }
    }

    /// Whether the endpoint expects the bearer credential.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Mine)
    }
}

pub const ADD_DONATION_PATH: &str = "/api/food/add";
