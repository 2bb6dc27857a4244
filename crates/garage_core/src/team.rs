//! Team state: sponsor, budget, inventory and bracket performance

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::catalog::CatalogRecord;

/// Match counters, updated only through [`Team::record_match`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Performance {
    pub wins: u32,
    pub losses: u32,
    /// Sum of the team's own round scores
    pub score: f64,
    /// Inventory size summed over every match played
    pub cars_used: usize,
}

/// A competing team
///
/// Inventory is append-only and never holds two records with the same model.
/// Budget only goes down through [`Team::buy`] and up through [`Team::award`].
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    sponsor: String,
    budget: f64,
    inventory: Vec<CatalogRecord>,
    performance: Performance,
}

impl Team {
    pub fn new(sponsor: &str, budget: f64) -> Self {
        Self {
            sponsor: sponsor.to_string(),
            budget,
            inventory: Vec::new(),
            performance: Performance::default(),
        }
    }

    pub fn sponsor(&self) -> &str {
        &self.sponsor
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn inventory(&self) -> &[CatalogRecord] {
        &self.inventory
    }

    pub fn performance(&self) -> &Performance {
        &self.performance
    }

    /// Models currently held
    pub fn owned_models(&self) -> HashSet<&str> {
        self.inventory.iter().map(|r| r.model.as_str()).collect()
    }

    pub fn owns(&self, model: &str) -> bool {
        self.inventory.iter().any(|r| r.model == model)
    }

    /// Round score: total efficiency of the current inventory
    pub fn score(&self) -> f64 {
        self.inventory.iter().map(|r| r.efficiency).sum()
    }

    /// Append `record` to the inventory and pay its price.
    ///
    /// Affordability is the caller's decision; the only check here is the
    /// unique-model invariant. Returns `false` (and changes nothing) if the
    /// model is already owned.
    pub fn buy(&mut self, record: &CatalogRecord) -> bool {
        if self.owns(&record.model) {
            tracing::warn!(
                sponsor = %self.sponsor,
                model = %record.model,
                "refusing duplicate purchase"
            );
            return false;
        }
        self.budget -= record.price;
        self.inventory.push(record.clone());
        true
    }

    /// Credit prize money
    pub fn award(&mut self, amount: f64) {
        self.budget += amount;
    }

    /// Count one played match with the round score it was decided on
    pub fn record_match(&mut self, won: bool, score: f64) {
        if won {
            self.performance.wins += 1;
        } else {
            self.performance.losses += 1;
        }
        self.performance.score += score;
        self.performance.cars_used += self.inventory.len();
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Team sponsored by {} with ${} available and {} cars",
            self.sponsor,
            format_currency(self.budget),
            self.inventory.len()
        )
    }
}

/// Format an amount with thousands separators and two decimals, e.g. `12,345.60`
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

#[cfg(test)]
#[path = "team_tests.rs"]
mod team_tests;
