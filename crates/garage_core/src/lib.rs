//! Core types for sponsor bracket tournaments
//!
//! This crate provides:
//! - The sponsor-partitioned [`Catalog`] loaded from a CSV dataset
//! - [`Team`] state carried across bracket rounds
//! - The [`PurchaseStrategy`] trait implemented by the buyer crates

pub mod catalog;
pub mod error;
pub mod team;

pub use catalog::*;
pub use error::*;
pub use team::*;

// =============================================================================
// Purchase strategy trait, implemented by every buyer crate
// =============================================================================

/// Trait that all purchasing strategies must implement.
///
/// A strategy looks at the records of the team's own sponsor that the team
/// does not already own, picks an affordable subset and applies it to the
/// team in place (inventory appended, budget debited). It must never touch
/// any other team and must not fail: an empty selection is a valid outcome.
pub trait PurchaseStrategy: Send {
    /// Select and buy inventory for `team` from `catalog`.
    fn purchase(&self, team: &mut Team, catalog: &Catalog);

    /// Short identifier used in logs and reports
    fn name(&self) -> &str;
}

/// Records of the team's sponsor that it does not own yet, in catalog order
pub fn available_records<'a>(team: &Team, catalog: &'a Catalog) -> Vec<&'a CatalogRecord> {
    let owned = team.owned_models();
    catalog
        .records()
        .iter()
        .filter(|r| r.sponsor == team.sponsor() && !owned.contains(r.model.as_str()))
        .collect()
}
