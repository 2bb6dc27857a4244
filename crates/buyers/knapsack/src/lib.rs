//! Knapsack Purchase Strategy
//!
//! Picks the subset of the sponsor's unowned models with the highest total
//! efficiency whose truncated prices fit in the truncated budget, using the
//! classic 0/1-knapsack dynamic program.
//!
//! Capacity is `floor(budget)` and each item weighs `floor(price)`. The team
//! is then charged the original, non-truncated prices. With whole-unit prices
//! the two agree exactly; with fractional prices the charge can exceed the
//! budget by under one unit per selected item. That rounding behaviour is
//! part of the strategy's contract and is kept as is.

use garage_core::{available_records, Catalog, CatalogRecord, PurchaseStrategy, Team};


/// Exact 0/1-knapsack buyer.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnapsackBuyer;

impl KnapsackBuyer {
    pub fn new() -> Self {
        Self
    }
}

impl PurchaseStrategy for KnapsackBuyer {
    fn purchase(&self, team: &mut Team, catalog: &Catalog) {
        let candidates = available_records(team, catalog);
        let capacity = discretize(team.budget());

        let picked = select(&candidates, capacity);

        let budget_before = team.budget();
        for record in &picked {
            team.buy(record);
        }

        tracing::debug!(
            sponsor = team.sponsor(),
            candidates = candidates.len(),
            capacity,
            bought = picked.len(),
            spent = budget_before - team.budget(),
            "knapsack purchase"
        );
    }

    fn name(&self) -> &str {
        "knapsack"
    }
}

/// Truncate a money amount to whole units. Negative and non-finite amounts
/// become 0.
pub fn discretize(amount: f64) -> usize {
    if amount.is_finite() && amount > 0.0 {
        amount.floor() as usize
    } else {
        0
    }
}

/// Solve the knapsack over `items` with the given capacity.
///
/// Returns the chosen records in backtrack order (last candidate first).
///
/// Only one row of values is kept live; alongside it a bit per `(i, c)`
/// cell records whether taking item `i` strictly beat skipping it. That bit
/// is exactly `dp[i][c] != dp[i-1][c]`, so backtracking over it walks the
/// same path as over the full value table.
///
/// The table is sized from the items, not the raw capacity. Every reachable
/// weight total is a multiple of the weights' common divisor `g`, so column
/// `c` of the full table equals column `c / g` of the scaled one. Columns at
/// or past the total weight of the items that fit are all identical. Both
/// reductions leave the selection unchanged.
pub fn select<'a>(items: &[&'a CatalogRecord], capacity: usize) -> Vec<&'a CatalogRecord> {
    let n = items.len();
    if n == 0 {
        return Vec::new();
    }

    let weights: Vec<usize> = items.iter().map(|r| discretize(r.price)).collect();
    let unit = weights
        .iter()
        .filter(|&&w| w <= capacity)
        .fold(0, |acc, &w| gcd(acc, w))
        .max(1);
    let reachable = weights
        .iter()
        .filter(|&&w| w <= capacity)
        .fold(0usize, |acc, &w| acc.saturating_add(w / unit));
    let columns = (capacity / unit).min(reachable);
    let width = columns + 1;

    let mut prev = vec![0.0f64; width];
    let mut curr = vec![0.0f64; width];
    let mut taken = vec![false; n * width];

    for i in 0..n {
        let value = items[i].efficiency;
        let row = &mut taken[i * width..(i + 1) * width];

        // Too heavy for the real capacity: never taken
        let weight = (weights[i] <= capacity).then(|| weights[i] / unit);

        for c in 0..width {
            let exclude = prev[c];
            if let Some(weight) = weight.filter(|&w| w <= c) {
                let include = value + prev[c - weight];
                if include > exclude {
                    curr[c] = include;
                    row[c] = true;
                    continue;
                }
            }
            curr[c] = exclude;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let mut picked = Vec::new();
    let mut c = columns;
    for i in (0..n).rev() {
        if taken[i * width + c] {
            picked.push(items[i]);
            c -= weights[i] / unit;
        }
    }
    picked
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
