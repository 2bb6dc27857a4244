use super::*;
use crate::bracket::WIN_PRIZE;
use crate::results::Outcome;
use garage_core::CatalogRecord;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

const SPONSORS: [&str; 8] = [
    "Audi", "BMW", "Honda", "Mazda", "Nissan", "Subaru", "Toyota", "Volvo",
];

/// Eight sponsors with six models each; prices and efficiencies vary per model
fn catalog() -> Catalog {
    let mut records = Vec::new();
    for (s, sponsor) in SPONSORS.iter().enumerate() {
        for m in 0..6 {
            let efficiency = 20.0 + ((s * 7 + m * 5) % 23) as f64;
            let price = 15000.0 + (((s * 3 + m * 11) % 9) as f64) * 5000.0;
            records.push(CatalogRecord::new(sponsor, &format!("model-{m}"), efficiency, price));
        }
    }
    Catalog::from_records(records)
}

fn config(nteams: i64, strategy: StrategyKind) -> TournamentConfig {
    let mut config = TournamentConfig::new("unused.csv", "Test", 40000.0, 120000.0, 20000.0);
    config.nteams = nteams;
    config.strategy = strategy;
    config
}

fn tournament(nteams: i64, strategy: StrategyKind) -> Tournament {
    Tournament::with_catalog(config(nteams, strategy), catalog()).unwrap()
}

#[test]
fn test_team_count_is_adjusted() {
    let t = tournament(3, StrategyKind::Greedy);
    assert_eq!(t.team_count(), 4);
    assert_eq!(t.to_string(), "Test Tournament with 4 teams");
}

#[test]
fn test_invalid_config_is_rejected_at_construction() {
    let err = Tournament::with_catalog(config(0, StrategyKind::Greedy), catalog()).unwrap_err();
    assert!(matches!(err, TournamentError::Config(_)));

    let mut bad_range = config(4, StrategyKind::Greedy);
    bad_range.default_incr = 0.0;
    let err = Tournament::with_catalog(bad_range, catalog()).unwrap_err();
    assert!(matches!(err, TournamentError::Config(_)));
}

#[test]
fn test_lifecycle_order_is_enforced() {
    let mut t = tournament(4, StrategyKind::Greedy);
    assert!(matches!(t.instantiate_teams(), Err(TournamentError::NotAssigned)));
    assert!(matches!(t.run_bracket(), Err(TournamentError::NoTeams)));
}

#[test]
fn test_full_run_invariants() {
    for strategy in [StrategyKind::Greedy, StrategyKind::Knapsack] {
        for nteams in [1, 2, 4, 8] {
            let mut t = tournament(nteams, strategy);
            let mut rng = StdRng::seed_from_u64(nteams as u64);

            let rounds = (nteams as f64).log2() as u32;
            let champion = t.run(&AssignmentOptions::default(), &mut rng).unwrap();
            assert_eq!(champion.performance().wins, rounds);
            assert!(champion.budget() >= 0.0);

            assert_eq!(t.matches().len(), nteams as usize - 1);
            for team in t.teams() {
                assert!(team.budget() >= 0.0);
                assert!(team.inventory().iter().all(|r| r.sponsor == team.sponsor()));
                let models: HashSet<&str> =
                    team.inventory().iter().map(|r| r.model.as_str()).collect();
                assert_eq!(models.len(), team.inventory().len());
            }
        }
    }
}

#[test]
fn test_spending_never_exceeds_grants() {
    let mut t = tournament(8, StrategyKind::Knapsack);
    let mut rng = StdRng::seed_from_u64(21);
    t.run(&AssignmentOptions::default(), &mut rng).unwrap();

    for (team, assignment) in t.teams().iter().zip(t.assignments()) {
        let granted = assignment.budget + team.performance().wins as f64 * WIN_PRIZE;
        let spent: f64 = team.inventory().iter().map(|r| r.price).sum();
        assert!(spent <= granted);
        assert!((granted - spent - team.budget()).abs() < 1e-6);
    }
}

#[test]
fn test_win_record_covers_every_round() {
    let mut t = tournament(8, StrategyKind::Greedy);
    let mut rng = StdRng::seed_from_u64(8);
    t.run(&AssignmentOptions::default(), &mut rng).unwrap();

    let record = t.win_record();
    assert_eq!(record.len(), 8);
    let champion = t.champion().unwrap().sponsor().to_string();
    assert_eq!(record.get(&champion), Some(&[Outcome::Win; 3][..]));

    for (sponsor, outcomes) in record.iter() {
        let team = t.teams().iter().find(|team| team.sponsor() == sponsor).unwrap();
        assert_eq!(outcomes.len() as u32, team.performance().wins + team.performance().losses);
        // Only the last entry of an eliminated team is a loss
        if sponsor != champion {
            assert_eq!(outcomes.last(), Some(&Outcome::Loss));
            assert!(outcomes[..outcomes.len() - 1].iter().all(|o| *o == Outcome::Win));
        }
    }
}

#[test]
fn test_single_team_tournament() {
    let mut t = tournament(1, StrategyKind::Greedy);
    let mut rng = StdRng::seed_from_u64(1);
    let champion = t.run(&AssignmentOptions::default(), &mut rng).unwrap();

    assert_eq!(champion.performance().wins, 0);
    assert!(t.matches().is_empty());
    assert_eq!(t.win_record().len(), 1);
}

#[test]
fn test_knapsack_opening_dominates_greedy() {
    let options = AssignmentOptions::default();

    let mut greedy = tournament(8, StrategyKind::Greedy);
    greedy
        .assign_sponsors_and_budgets(&options, &mut StdRng::seed_from_u64(4))
        .unwrap();
    greedy.instantiate_teams().unwrap();
    let greedy_scores: Vec<f64> = greedy.run_initial_purchases().iter().map(|t| t.score()).collect();

    let mut knapsack = tournament(8, StrategyKind::Knapsack);
    knapsack
        .assign_sponsors_and_budgets(&options, &mut StdRng::seed_from_u64(4))
        .unwrap();
    knapsack.instantiate_teams().unwrap();
    let knapsack_scores: Vec<f64> =
        knapsack.run_initial_purchases().iter().map(|t| t.score()).collect();

    assert_eq!(greedy.assignments(), knapsack.assignments());
    for (g, k) in greedy_scores.iter().zip(&knapsack_scores) {
        assert!(k >= g);
    }
}

#[test]
fn test_reassignment_resets_state() {
    let mut t = tournament(4, StrategyKind::Greedy);
    let mut rng = StdRng::seed_from_u64(2);
    t.run(&AssignmentOptions::default(), &mut rng).unwrap();
    assert!(t.champion().is_some());

    let options = AssignmentOptions {
        sponsors: vec!["Volvo".to_string()],
        fixed_budget: Some(60000.0),
        ..Default::default()
    };
    t.assign_sponsors_and_budgets(&options, &mut rng).unwrap();

    assert!(t.teams().is_empty());
    assert!(t.matches().is_empty());
    assert!(t.champion().is_none());
    assert_eq!(t.assignments()[0].sponsor, "Volvo");
    assert!(t.assignments().iter().all(|a| a.budget == 60000.0));
    assert!(t.win_record().iter().all(|(_, outcomes)| outcomes.is_empty()));
}

#[test]
fn test_set_strategy() {
    let mut t = tournament(2, StrategyKind::Greedy);
    assert_eq!(t.strategy_name(), "greedy");
    t.set_strategy(StrategyKind::Knapsack);
    assert_eq!(t.strategy_name(), "knapsack");
    assert_eq!(t.config().strategy, StrategyKind::Knapsack);
}

#[test]
fn test_too_many_teams_exhausts_sponsors() {
    let mut t = tournament(16, StrategyKind::Greedy);
    let mut rng = StdRng::seed_from_u64(0);
    let err = t
        .assign_sponsors_and_budgets(&AssignmentOptions::default(), &mut rng)
        .unwrap_err();
    assert!(matches!(
        err,
        TournamentError::ExhaustedSponsorPool { requested: 16, available: 8 }
    ));
}
