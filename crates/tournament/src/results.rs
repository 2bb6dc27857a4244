//! Tournament results and reporting

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Outcome of one match for one sponsor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "W"),
            Outcome::Loss => write!(f, "L"),
        }
    }
}

/// Per-sponsor sequence of round outcomes, in team order
///
/// Serializes as a JSON object `{ "<sponsor>": ["W", "L"], ... }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WinRecord {
    entries: Vec<(String, Vec<Outcome>)>,
}

impl WinRecord {
    /// Start a record with an empty history for each sponsor
    pub fn new<'a>(sponsors: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            entries: sponsors
                .into_iter()
                .map(|s| (s.to_string(), Vec::new()))
                .collect(),
        }
    }

    /// Append an outcome for `sponsor`
    pub fn record(&mut self, sponsor: &str, outcome: Outcome) {
        match self.entries.iter_mut().find(|(s, _)| s == sponsor) {
            Some((_, outcomes)) => outcomes.push(outcome),
            None => self.entries.push((sponsor.to_string(), vec![outcome])),
        }
    }

    pub fn get(&self, sponsor: &str) -> Option<&[Outcome]> {
        self.entries
            .iter()
            .find(|(s, _)| s == sponsor)
            .map(|(_, outcomes)| outcomes.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Outcome])> {
        self.entries
            .iter()
            .map(|(s, outcomes)| (s.as_str(), outcomes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generate a text report, one sponsor per line
    pub fn render(&self) -> String {
        let mut report = String::new();
        for (sponsor, outcomes) in self.iter() {
            let line: Vec<String> = outcomes.iter().map(|o| o.to_string()).collect();
            report.push_str(&format!("{:>15}: {}\n", sponsor, line.join(" ")));
        }
        report
    }
}

impl Serialize for WinRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (sponsor, outcomes) in &self.entries {
            map.serialize_entry(sponsor, outcomes)?;
        }
        map.end()
    }
}

/// A single match in the bracket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    /// 1-based round number
    pub round: u32,
    pub team1: String,
    pub team2: String,
    pub score1: f64,
    pub score2: f64,
    pub winner: String,
}

impl MatchEntry {
    pub fn loser(&self) -> &str {
        if self.winner == self.team1 {
            &self.team2
        } else {
            &self.team1
        }
    }
}

/// Generate a text report of every match, grouped by round
pub fn match_report(matches: &[MatchEntry]) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "{:<6} {:<15} vs {:<15} {:>9}-{:<9} {}\n",
        "Round", "Team 1", "Team 2", "Score 1", "Score 2", "Winner"
    ));
    report.push_str(&"-".repeat(72));
    report.push('\n');

    for entry in matches {
        report.push_str(&format!(
            "{:<6} {:<15} vs {:<15} {:>9.1}-{:<9.1} {}\n",
            entry.round, entry.team1, entry.team2, entry.score1, entry.score2, entry.winner
        ));
    }

    report
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
