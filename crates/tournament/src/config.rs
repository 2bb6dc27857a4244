//! Tournament configuration
//!
//! A flat key-value document, read as TOML when the file ends in `.toml` and
//! as JSON otherwise:
//!
//! ```json
//! {
//!   "path": "cardata_modified.csv",
//!   "name": "Green Cup",
//!   "nteams": 16,
//!   "default_low": 100000,
//!   "default_high": 200000,
//!   "default_incr": 5000,
//!   "strategy": "knapsack"
//! }
//! ```

use garage_core::{ColumnMap, PurchaseStrategy};
use greedy_buyer::GreedyBuyer;
use knapsack_buyer::KnapsackBuyer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::assignment::BudgetRange;
use crate::error::{Result, TournamentError};

/// Default number of teams when `nteams` is absent
pub const DEFAULT_TEAM_COUNT: i64 = 16;

/// Which purchasing strategy the tournament uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Greedy,
    Knapsack,
}

impl StrategyKind {
    pub fn create(self) -> Box<dyn PurchaseStrategy> {
        match self {
            StrategyKind::Greedy => Box::new(GreedyBuyer::new()),
            StrategyKind::Knapsack => Box::new(KnapsackBuyer::new()),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "greedy" => Ok(StrategyKind::Greedy),
            "knapsack" | "optimal" | "dp" => Ok(StrategyKind::Knapsack),
            other => Err(TournamentError::Config(format!("unknown strategy '{other}'"))),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Greedy => write!(f, "greedy"),
            StrategyKind::Knapsack => write!(f, "knapsack"),
        }
    }
}

/// Tournament parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Dataset location
    pub path: PathBuf,
    /// Tournament label
    pub name: String,
    /// Requested team count, rounded up to a power of two
    #[serde(default = "default_nteams")]
    pub nteams: i64,
    pub default_low: f64,
    pub default_high: f64,
    pub default_incr: f64,
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Seed for sponsor and budget draws (entropy when absent)
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_sponsor_column")]
    pub sponsor_column: String,
    #[serde(default = "default_model_column")]
    pub model_column: String,
    #[serde(default = "default_efficiency_column")]
    pub efficiency_column: String,
    #[serde(default = "default_price_column")]
    pub price_column: String,
}

fn default_nteams() -> i64 {
    DEFAULT_TEAM_COUNT
}

fn default_sponsor_column() -> String {
    ColumnMap::default().sponsor
}

fn default_model_column() -> String {
    ColumnMap::default().model
}

fn default_efficiency_column() -> String {
    ColumnMap::default().efficiency
}

fn default_price_column() -> String {
    ColumnMap::default().price
}

impl TournamentConfig {
    /// Build a config with default team count, strategy and column names
    pub fn new(path: impl Into<PathBuf>, name: &str, low: f64, high: f64, incr: f64) -> Self {
        let columns = ColumnMap::default();
        Self {
            path: path.into(),
            name: name.to_string(),
            nteams: DEFAULT_TEAM_COUNT,
            default_low: low,
            default_high: high,
            default_incr: incr,
            strategy: StrategyKind::default(),
            seed: None,
            sponsor_column: columns.sponsor,
            model_column: columns.model,
            efficiency_column: columns.efficiency,
            price_column: columns.price,
        }
    }

    /// Load configuration from a JSON or TOML file.
    ///
    /// A relative dataset `path` is resolved against the config file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TournamentError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let mut config = if is_toml {
            Self::from_toml_str(&contents)?
        } else {
            Self::from_json_str(&contents)?
        };

        if config.path.is_relative() {
            if let Some(dir) = path.parent() {
                config.path = dir.join(&config.path);
            }
        }

        tracing::debug!(
            config = %path.display(),
            dataset = %config.path.display(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| TournamentError::Config(format!("invalid JSON config: {e}")))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| TournamentError::Config(format!("invalid TOML config: {e}")))
    }

    pub fn columns(&self) -> ColumnMap {
        ColumnMap {
            sponsor: self.sponsor_column.clone(),
            model: self.model_column.clone(),
            efficiency: self.efficiency_column.clone(),
            price: self.price_column.clone(),
        }
    }

    /// Validate and return the effective team count.
    ///
    /// A count that is not a power of two is rounded up with a warning.
    pub fn team_count(&self) -> Result<usize> {
        if self.nteams <= 0 {
            return Err(TournamentError::Config(format!(
                "the number of teams must be positive, got {}",
                self.nteams
            )));
        }
        let requested = usize::try_from(self.nteams).map_err(|_| {
            TournamentError::Config(format!("team count {} is too large", self.nteams))
        })?;
        let adjusted = adjusted_team_count(requested).ok_or_else(|| {
            TournamentError::Config(format!("team count {requested} is too large"))
        })?;
        if adjusted != requested {
            tracing::warn!(requested, adjusted, "the number of teams has been adjusted");
        }
        Ok(adjusted)
    }

    /// Default budget range from the config
    pub fn budget_range(&self) -> BudgetRange {
        BudgetRange {
            low: self.default_low,
            high: self.default_high,
            incr: self.default_incr,
        }
    }
}

/// Smallest power of two that is at least `n` (`None` on overflow)
pub fn adjusted_team_count(n: usize) -> Option<usize> {
    n.max(1).checked_next_power_of_two()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
