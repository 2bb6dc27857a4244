//! Tournament lifecycle
//!
//! A [`Tournament`] walks through four stages, each of which can be re-run:
//!
//! 1. [`Tournament::assign_sponsors_and_budgets`] draws sponsors and budgets
//! 2. [`Tournament::instantiate_teams`] builds one empty team per slot
//! 3. [`Tournament::run_initial_purchases`] lets every team shop once
//! 4. [`Tournament::run_bracket`] plays the elimination rounds
//!
//! [`Tournament::run`] chains all four.

use garage_core::{Catalog, PurchaseStrategy, Team};
use rand::Rng;
use std::fmt;

use crate::assignment::{assign_sponsors_and_budgets, Assignment, AssignmentOptions};
use crate::bracket::BracketEngine;
use crate::config::{StrategyKind, TournamentConfig};
use crate::error::{Result, TournamentError};
use crate::results::{MatchEntry, WinRecord};

/// Process-wide simulation state for one tournament
pub struct Tournament {
    config: TournamentConfig,
    team_count: usize,
    catalog: Catalog,
    strategy: Box<dyn PurchaseStrategy>,
    assignments: Vec<Assignment>,
    teams: Vec<Team>,
    win_record: WinRecord,
    matches: Vec<MatchEntry>,
    champion: Option<usize>,
}

impl Tournament {
    /// Validate `config` and load the dataset it points at
    pub fn initialize(config: TournamentConfig) -> Result<Self> {
        let team_count = config.team_count()?;
        config.budget_range().validate()?;
        let catalog = Catalog::load_csv(&config.path, &config.columns())?;
        Self::build(config, team_count, catalog)
    }

    /// Validate `config` and use an already loaded catalog
    pub fn with_catalog(config: TournamentConfig, catalog: Catalog) -> Result<Self> {
        let team_count = config.team_count()?;
        config.budget_range().validate()?;
        Self::build(config, team_count, catalog)
    }

    fn build(config: TournamentConfig, team_count: usize, catalog: Catalog) -> Result<Self> {
        tracing::info!(
            name = %config.name,
            team_count,
            records = catalog.len(),
            strategy = %config.strategy,
            "tournament initialized"
        );
        Ok(Self {
            strategy: config.strategy.create(),
            config,
            team_count,
            catalog,
            assignments: Vec::new(),
            teams: Vec::new(),
            win_record: WinRecord::default(),
            matches: Vec::new(),
            champion: None,
        })
    }

    /// Swap the purchasing strategy used by later purchase steps
    pub fn set_strategy(&mut self, kind: StrategyKind) {
        self.config.strategy = kind;
        self.strategy = kind.create();
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn matches(&self) -> &[MatchEntry] {
        &self.matches
    }

    pub fn win_record(&self) -> &WinRecord {
        &self.win_record
    }

    pub fn champion(&self) -> Option<&Team> {
        self.champion.map(|idx| &self.teams[idx])
    }

    /// Draw a sponsor and budget for every slot.
    ///
    /// This is a full reset: previous teams and results are discarded.
    pub fn assign_sponsors_and_budgets<R: Rng + ?Sized>(
        &mut self,
        options: &AssignmentOptions,
        rng: &mut R,
    ) -> Result<()> {
        let range = options.budget_range(self.config.budget_range());
        let assignments =
            assign_sponsors_and_budgets(&self.catalog, self.team_count, options, range, rng)?;

        self.win_record = WinRecord::new(assignments.iter().map(|a| a.sponsor.as_str()));
        self.assignments = assignments;
        self.teams.clear();
        self.matches.clear();
        self.champion = None;
        Ok(())
    }

    /// Build one fresh team per assignment slot
    pub fn instantiate_teams(&mut self) -> Result<()> {
        if self.assignments.is_empty() {
            return Err(TournamentError::NotAssigned);
        }
        self.teams = self
            .assignments
            .iter()
            .map(|a| Team::new(&a.sponsor, a.budget))
            .collect();
        self.matches.clear();
        self.champion = None;
        Ok(())
    }

    /// Let every team spend its starting budget
    pub fn run_initial_purchases(&mut self) -> &[Team] {
        for team in &mut self.teams {
            self.strategy.purchase(team, &self.catalog);
        }
        &self.teams
    }

    /// Play the bracket and return the champion
    pub fn run_bracket(&mut self) -> Result<&Team> {
        if self.teams.is_empty() {
            return Err(TournamentError::NoTeams);
        }

        self.win_record = WinRecord::new(self.teams.iter().map(|t| t.sponsor()));
        self.matches.clear();

        let engine = BracketEngine::new(&self.catalog, self.strategy.as_ref());
        let champion = engine
            .run(&mut self.teams, &mut self.win_record, &mut self.matches)
            .ok_or(TournamentError::NoTeams)?;

        self.champion = Some(champion);
        Ok(&self.teams[champion])
    }

    /// Assign, build teams, shop and play the bracket in one go
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        options: &AssignmentOptions,
        rng: &mut R,
    ) -> Result<&Team> {
        self.assign_sponsors_and_budgets(options, rng)?;
        self.instantiate_teams()?;
        self.run_initial_purchases();
        self.run_bracket()
    }
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Tournament with {} teams", self.config.name, self.team_count)
    }
}

impl fmt::Debug for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tournament")
            .field("name", &self.config.name)
            .field("team_count", &self.team_count)
            .field("strategy", &self.strategy.name())
            .field("teams", &self.teams.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
