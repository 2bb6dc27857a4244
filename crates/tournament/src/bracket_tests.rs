use super::*;
use garage_core::CatalogRecord;
use greedy_buyer::GreedyBuyer;

/// Team whose inventory already scores `score` (one car, price 0)
fn team_with_score(sponsor: &str, score: f64, budget: f64) -> Team {
    let mut team = Team::new(sponsor, budget);
    team.buy(&CatalogRecord::new(sponsor, "starter", score, 0.0));
    team
}

fn run(teams: &mut [Team], catalog: &Catalog) -> (Option<usize>, WinRecord, Vec<MatchEntry>) {
    let strategy = GreedyBuyer::new();
    let engine = BracketEngine::new(catalog, &strategy);
    let mut record = WinRecord::new(teams.iter().map(|t| t.sponsor()));
    let mut log = Vec::new();
    let champion = engine.run(teams, &mut record, &mut log);
    (champion, record, log)
}

#[test]
fn test_tie_goes_to_second_team() {
    let catalog = Catalog::default();
    let mut teams = vec![
        team_with_score("team1", 40.0, 0.0),
        team_with_score("team2", 40.0, 0.0),
    ];

    let (champion, record, log) = run(&mut teams, &catalog);

    assert_eq!(champion, Some(1));
    assert_eq!(log[0].winner, "team2");
    assert_eq!(record.get("team1"), Some(&[Outcome::Loss][..]));
    assert_eq!(record.get("team2"), Some(&[Outcome::Win][..]));
}

#[test]
fn test_strictly_higher_score_wins() {
    let catalog = Catalog::default();
    let mut teams = vec![
        team_with_score("team1", 41.0, 0.0),
        team_with_score("team2", 40.0, 0.0),
    ];

    let (champion, _, _) = run(&mut teams, &catalog);
    assert_eq!(champion, Some(0));
}

#[test]
fn test_counters_and_prize() {
    let catalog = Catalog::default();
    let mut teams = vec![
        team_with_score("A", 10.0, 1000.0),
        team_with_score("B", 30.0, 2000.0),
    ];

    run(&mut teams, &catalog);

    let (loser, winner) = (&teams[0], &teams[1]);
    assert_eq!(winner.performance().wins, 1);
    assert_eq!(winner.performance().losses, 0);
    assert_eq!(winner.performance().score, 30.0);
    assert_eq!(winner.performance().cars_used, 1);
    assert_eq!(winner.budget(), 2000.0 + WIN_PRIZE);

    assert_eq!(loser.performance().wins, 0);
    assert_eq!(loser.performance().losses, 1);
    assert_eq!(loser.performance().score, 10.0);
    assert_eq!(loser.performance().cars_used, 1);
    assert_eq!(loser.budget(), 1000.0);
}

#[test]
fn test_winner_reprovisions_and_loser_is_frozen() {
    let catalog = Catalog::from_records(vec![
        CatalogRecord::new("A", "a-upgrade", 5.0, 40000.0),
        CatalogRecord::new("B", "b-upgrade", 5.0, 40000.0),
    ]);
    let mut teams = vec![
        team_with_score("A", 10.0, 0.0),
        team_with_score("B", 30.0, 0.0),
    ];

    run(&mut teams, &catalog);

    assert_eq!(teams[1].inventory().len(), 2);
    assert_eq!(teams[1].budget(), WIN_PRIZE - 40000.0);
    assert_eq!(teams[0].inventory().len(), 1);
}

#[test]
fn test_rounds_halve_the_field() {
    let catalog = Catalog::default();
    let mut teams: Vec<Team> = (0..8)
        .map(|i| team_with_score(&format!("T{i}"), i as f64, 0.0))
        .collect();

    let (champion, record, log) = run(&mut teams, &catalog);

    // 4 + 2 + 1 matches over log2(8) = 3 rounds
    assert_eq!(log.len(), 7);
    for (round, expected) in [(1, 4), (2, 2), (3, 1)] {
        assert_eq!(log.iter().filter(|m| m.round == round).count(), expected);
    }

    let champion = champion.unwrap();
    assert_eq!(teams[champion].sponsor(), "T7");
    assert_eq!(teams[champion].performance().wins, 3);
    assert_eq!(record.get("T7").unwrap().len(), 3);
    assert_eq!(record.get("T0"), Some(&[Outcome::Loss][..]));
}

#[test]
fn test_every_winner_scored_at_least_as_much() {
    let catalog = Catalog::default();
    let scores = [12.0, 12.0, 3.0, 50.0, 7.5, 7.5, 20.0, 1.0];
    let mut teams: Vec<Team> = scores
        .iter()
        .enumerate()
        .map(|(i, &s)| team_with_score(&format!("T{i}"), s, 0.0))
        .collect();

    let (_, _, log) = run(&mut teams, &catalog);

    for entry in &log {
        let (winner_score, loser_score) = if entry.winner == entry.team1 {
            (entry.score1, entry.score2)
        } else {
            (entry.score2, entry.score1)
        };
        assert!(winner_score >= loser_score);
        if entry.score1 == entry.score2 {
            assert_eq!(entry.winner, entry.team2);
        }
    }
}

#[test]
fn test_single_team_has_no_rounds() {
    let catalog = Catalog::default();
    let mut teams = vec![team_with_score("Solo", 5.0, 100.0)];

    let (champion, record, log) = run(&mut teams, &catalog);

    assert_eq!(champion, Some(0));
    assert!(log.is_empty());
    assert_eq!(record.get("Solo"), Some(&[][..]));
    assert_eq!(teams[0].budget(), 100.0);
}

#[test]
fn test_empty_bracket_has_no_champion() {
    let catalog = Catalog::default();
    let mut teams: Vec<Team> = Vec::new();
    let (champion, _, log) = run(&mut teams, &catalog);
    assert_eq!(champion, None);
    assert!(log.is_empty());
}

#[test]
fn test_odd_field_gives_last_team_a_bye() {
    let catalog = Catalog::default();
    let mut teams = vec![
        team_with_score("A", 1.0, 0.0),
        team_with_score("B", 2.0, 0.0),
        team_with_score("C", 3.0, 0.0),
    ];

    let (champion, _, log) = run(&mut teams, &catalog);

    assert_eq!(log.len(), 2);
    assert_eq!(champion, Some(2));
}
