//! Single-elimination bracket engine
//!
//! Teams are paired in slot order, `(0, 1), (2, 3), ...`. The team with the
//! strictly higher inventory score advances; a tie goes to the second team of
//! the pair. Winners collect the prize and shop again before the next round.
//! Losers keep their state frozen for reporting.

use garage_core::{Catalog, PurchaseStrategy, Team};

use crate::results::{MatchEntry, Outcome, WinRecord};

/// Prize credited to the winner of every match
pub const WIN_PRIZE: f64 = 50_000.0;

/// Runs bracket rounds over a set of teams
pub struct BracketEngine<'a> {
    catalog: &'a Catalog,
    strategy: &'a dyn PurchaseStrategy,
    prize: f64,
}

impl<'a> BracketEngine<'a> {
    pub fn new(catalog: &'a Catalog, strategy: &'a dyn PurchaseStrategy) -> Self {
        Self {
            catalog,
            strategy,
            prize: WIN_PRIZE,
        }
    }

    /// Play every round until one team is left.
    ///
    /// Returns the champion's index into `teams`, or `None` when `teams` is
    /// empty. Outcomes go to `record` and one entry per match to `log`.
    pub fn run(
        &self,
        teams: &mut [Team],
        record: &mut WinRecord,
        log: &mut Vec<MatchEntry>,
    ) -> Option<usize> {
        let mut active: Vec<usize> = (0..teams.len()).collect();
        let mut round = 0u32;

        while active.len() > 1 {
            round += 1;
            tracing::info!(
                round,
                teams = active.len(),
                strategy = self.strategy.name(),
                "starting round"
            );

            let mut next_round = Vec::with_capacity(active.len() / 2 + 1);
            let pairs = active.chunks_exact(2);
            let bye = pairs.remainder().first().copied();

            for pair in pairs {
                let winner = self.play_match(teams, pair[0], pair[1], round, record, log);
                next_round.push(winner);
            }

            if let Some(idx) = bye {
                tracing::warn!(
                    sponsor = teams[idx].sponsor(),
                    round,
                    "odd bracket, team gets a bye"
                );
                next_round.push(idx);
            }

            active = next_round;
        }

        let champion = active.first().copied();
        if let Some(idx) = champion {
            tracing::info!(
                sponsor = teams[idx].sponsor(),
                rounds = round,
                "champion decided"
            );
        }
        champion
    }

    /// Play one match and return the winner's index
    fn play_match(
        &self,
        teams: &mut [Team],
        first: usize,
        second: usize,
        round: u32,
        record: &mut WinRecord,
        log: &mut Vec<MatchEntry>,
    ) -> usize {
        let score1 = teams[first].score();
        let score2 = teams[second].score();

        let (winner, loser) = if score1 > score2 {
            (first, second)
        } else {
            (second, first)
        };

        for (idx, score) in [(first, score1), (second, score2)] {
            teams[idx].record_match(idx == winner, score);
        }

        record.record(teams[winner].sponsor(), Outcome::Win);
        record.record(teams[loser].sponsor(), Outcome::Loss);

        log.push(MatchEntry {
            round,
            team1: teams[first].sponsor().to_string(),
            team2: teams[second].sponsor().to_string(),
            score1,
            score2,
            winner: teams[winner].sponsor().to_string(),
        });

        tracing::debug!(
            round,
            winner = teams[winner].sponsor(),
            loser = teams[loser].sponsor(),
            score1,
            score2,
            "match played"
        );

        let advancing = &mut teams[winner];
        advancing.award(self.prize);
        self.strategy.purchase(advancing, self.catalog);

        winner
    }
}

#[cfg(test)]
#[path = "bracket_tests.rs"]
mod bracket_tests;
