//! Impact stats shown beside the donation list.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use crate::net::types::Donation;

/// Placeholder points total; not derived from data.
pub const PLACEHOLDER_POINTS: u32 = 1250;
/// Placeholder count of NGOs helped; not derived from data.
pub const PLACEHOLDER_NGOS_HELPED: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactStats {
    pub kgs_donated: f64,
    pub points: u32,
    pub ngos_helped: u32,
}

/// Sum quantities over `items`, counting a missing quantity as zero.
#[must_use]
pub fn derive_stats(items: &[Donation]) -> ImpactStats {
    ImpactStats {
        kgs_donated: items.iter().map(Donation::quantity_or_zero).sum(),
        points: PLACEHOLDER_POINTS,
        ngos_helped: PLACEHOLDER_NGOS_HELPED,
    }
}
