//! Greedy Purchase Strategy
//!
//! Buys the sponsor's most efficient models first, one pass, taking each
//! candidate whose price still fits the remaining budget. Fast and simple,
//! but not optimal: an early expensive pick can crowd out a cheaper pair
//! that would have scored more.

use garage_core::{available_records, Catalog, PurchaseStrategy, Team};


/// Efficiency-ranked single-pass buyer.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBuyer;

impl GreedyBuyer {
    pub fn new() -> Self {
        Self
    }
}

impl PurchaseStrategy for GreedyBuyer {
    fn purchase(&self, team: &mut Team, catalog: &Catalog) {
        let mut candidates = available_records(team, catalog);

        // Stable sort: equal efficiencies keep catalog order
        candidates.sort_by(|a, b| b.efficiency.total_cmp(&a.efficiency));

        let budget_before = team.budget();
        let mut bought = 0usize;
        for record in candidates {
            if record.price <= team.budget() && team.buy(record) {
                bought += 1;
            }
        }

        tracing::debug!(
            sponsor = team.sponsor(),
            bought,
            spent = budget_before - team.budget(),
            "greedy purchase"
        );
    }

    fn name(&self) -> &str {
        "greedy"
    }
}
