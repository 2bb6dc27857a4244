//! Sponsor Bracket Tournament
//!
//! This crate provides infrastructure for:
//! - Loading tournament parameters and the vehicle catalog
//! - Assigning sponsors and starting budgets to teams
//! - Running a single-elimination bracket where winners re-provision
//!   between rounds using a pluggable purchase strategy
//! - Reporting per-sponsor win records and match logs
//!
//! # Usage
//!
//! ```bash
//! # Run a tournament with the strategy named in the config
//! cargo run -p tournament -- run data/config.json --seed 7
//!
//! # Same draw, both strategies side by side
//! cargo run -p tournament -- compare data/config.json --seed 7
//! ```

mod assignment;
mod bracket;
mod config;
mod error;
mod results;
mod runner;

pub use assignment::*;
pub use bracket::*;
pub use config::*;
pub use error::*;
pub use results::*;
pub use runner::*;
