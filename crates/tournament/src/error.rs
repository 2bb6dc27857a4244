//! Tournament error types

use garage_core::CatalogError;
use thiserror::Error;

/// Everything that can abort a tournament operation.
///
/// None of these are retried: the simulation has no transient failures.
#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "Sponsor pool exhausted: {requested} teams need distinct sponsors \
         but the catalog only has {available}"
    )]
    ExhaustedSponsorPool { requested: usize, available: usize },

    #[error("Data integrity error: {0}")]
    DataIntegrity(#[from] CatalogError),

    #[error("Sponsors and budgets have not been assigned yet")]
    NotAssigned,

    #[error("No teams to run a bracket with")]
    NoTeams,
}

pub type Result<T> = std::result::Result<T, TournamentError>;
