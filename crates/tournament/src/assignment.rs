//! Sponsor and budget assignment
//!
//! Every team slot gets a distinct sponsor and a starting budget before any
//! purchasing happens. Random draws come from the caller's RNG so runs can be
//! reproduced from a seed.

use garage_core::Catalog;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TournamentError};

const STEP_TOLERANCE: f64 = 1e-9;

/// Inclusive arithmetic budget range `low, low + incr, ..., <= high`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub low: f64,
    pub high: f64,
    pub incr: f64,
}

impl BudgetRange {
    pub fn validate(&self) -> Result<()> {
        let finite = self.low.is_finite() && self.high.is_finite() && self.incr.is_finite();
        if !finite || self.incr <= 0.0 || self.low > self.high {
            return Err(TournamentError::Config(format!(
                "invalid budget range: low {}, high {}, increment {}",
                self.low, self.high, self.incr
            )));
        }
        Ok(())
    }

    pub fn contains(&self, amount: f64) -> bool {
        self.low <= amount && amount <= self.high
    }

    /// Number of budgets in the range.
    ///
    /// A step that lands within float noise of `high` still counts. Ranges
    /// with more steps than fit in a `u64` saturate.
    pub fn steps(&self) -> Result<u64> {
        self.validate()?;
        let span = ((self.high - self.low) / self.incr + STEP_TOLERANCE).floor();
        Ok((span as u64).saturating_add(1))
    }

    /// The `k`-th budget of the range, never above `high`
    pub fn nth(&self, k: u64) -> f64 {
        (self.low + k as f64 * self.incr).min(self.high)
    }

    /// Draw one budget uniformly from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        let steps = self.steps()?;
        Ok(self.nth(rng.gen_range(0..steps)))
    }
}

/// Caller overrides for one assignment pass.
///
/// Unset bounds fall back to the config defaults.
#[derive(Debug, Clone, Default)]
pub struct AssignmentOptions {
    /// Sponsors handed out in order before any random draw
    pub sponsors: Vec<String>,
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub incr: Option<f64>,
    /// Budget given to every team when it lies inside `[low, high]`
    pub fixed_budget: Option<f64>,
}

impl AssignmentOptions {
    /// Effective budget range given the config defaults
    pub fn budget_range(&self, defaults: BudgetRange) -> BudgetRange {
        BudgetRange {
            low: self.low.unwrap_or(defaults.low),
            high: self.high.unwrap_or(defaults.high),
            incr: self.incr.unwrap_or(defaults.incr),
        }
    }
}

/// Sponsor and starting budget for one team slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub sponsor: String,
    pub budget: f64,
}

/// Assign a sponsor and budget to each of `team_count` slots.
///
/// Sponsors come from `options.sponsors` first, then uniformly from catalog
/// sponsors nobody holds yet. All sponsors are drawn before any budget.
pub fn assign_sponsors_and_budgets<R: Rng + ?Sized>(
    catalog: &Catalog,
    team_count: usize,
    options: &AssignmentOptions,
    range: BudgetRange,
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    range.validate()?;

    let sponsors = pick_sponsors(catalog, team_count, &options.sponsors, rng)?;

    let fixed = options.fixed_budget.filter(|&b| range.contains(b));
    if let Some(amount) = options.fixed_budget {
        if fixed.is_none() {
            tracing::warn!(
                amount,
                low = range.low,
                high = range.high,
                "fixed budget outside range, drawing budgets instead"
            );
        }
    }

    let mut assignments = Vec::with_capacity(team_count);
    for sponsor in sponsors {
        let budget = match fixed {
            Some(amount) => amount,
            None => range.sample(rng)?,
        };
        assignments.push(Assignment { sponsor, budget });
    }
    Ok(assignments)
}

fn pick_sponsors<R: Rng + ?Sized>(
    catalog: &Catalog,
    team_count: usize,
    explicit: &[String],
    rng: &mut R,
) -> Result<Vec<String>> {
    let mut chosen: Vec<String> = Vec::with_capacity(team_count);

    for sponsor in explicit.iter().take(team_count) {
        if chosen.contains(sponsor) {
            return Err(TournamentError::Config(format!(
                "sponsor '{sponsor}' is listed more than once"
            )));
        }
        if catalog.records_for(sponsor).next().is_none() {
            tracing::warn!(sponsor = %sponsor, "sponsor has no catalog records");
        }
        chosen.push(sponsor.clone());
    }

    let available = catalog.sponsors();
    while chosen.len() < team_count {
        let unassigned: Vec<&str> = available
            .iter()
            .copied()
            .filter(|s| !chosen.iter().any(|c| c.as_str() == *s))
            .collect();

        match unassigned.choose(rng) {
            Some(sponsor) => chosen.push(sponsor.to_string()),
            None => {
                return Err(TournamentError::ExhaustedSponsorPool {
                    requested: team_count,
                    available: available.len(),
                })
            }
        }
    }

    Ok(chosen)
}

#[cfg(test)]
#[path = "assignment_tests.rs"]
mod assignment_tests;
