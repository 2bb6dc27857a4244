//! Tournament CLI
//!
//! Run sponsor bracket tournaments and compare purchase strategies.

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::path::Path;
use tournament::{match_report, AssignmentOptions, StrategyKind, Tournament, TournamentConfig};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Sponsor Bracket Tournament");
    println!();
    println!("Usage:");
    println!("  tournament run <config> [options] [--json]");
    println!("  tournament compare <config> [options]");
    println!();
    println!("Options:");
    println!("  --strategy, -s NAME   greedy | knapsack (overrides config)");
    println!("  --seed N              seed for sponsor and budget draws");
    println!("  --budget B            give every team the same budget");
    println!("  --sponsors A,B,...    assign these sponsors first");
    println!("  --low L / --high H / --incr I   budget range overrides");
    println!();
    println!("Examples:");
    println!("  tournament run data/config.json --seed 7");
    println!("  tournament compare data/config.json --seed 7 --budget 150000");
}

/// Options shared by `run` and `compare`
#[derive(Debug, Default)]
struct CliOptions {
    strategy: Option<StrategyKind>,
    seed: Option<u64>,
    json: bool,
    assignment: AssignmentOptions,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> anyhow::Result<T> {
    let raw = value.with_context(|| format!("{flag} needs a value"))?;
    raw.parse()
        .map_err(|_| anyhow::anyhow!("invalid value for {flag}: {raw}"))
}

fn parse_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "--strategy" | "-s" => {
                let raw = value.context("--strategy needs a value")?;
                options.strategy = Some(raw.parse()?);
                i += 1;
            }
            "--seed" => {
                options.seed = Some(parse_value(flag, value)?);
                i += 1;
            }
            "--budget" | "-b" => {
                options.assignment.fixed_budget = Some(parse_value(flag, value)?);
                i += 1;
            }
            "--sponsors" => {
                let raw = value.context("--sponsors needs a value")?;
                options.assignment.sponsors = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                i += 1;
            }
            "--low" => {
                options.assignment.low = Some(parse_value(flag, value)?);
                i += 1;
            }
            "--high" => {
                options.assignment.high = Some(parse_value(flag, value)?);
                i += 1;
            }
            "--incr" => {
                options.assignment.incr = Some(parse_value(flag, value)?);
                i += 1;
            }
            "--json" => options.json = true,
            other => bail!("unknown option: {other}"),
        }
        i += 1;
    }

    Ok(options)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load(config_path: &str, options: &CliOptions) -> anyhow::Result<Tournament> {
    let config = TournamentConfig::load(Path::new(config_path))
        .with_context(|| format!("Failed to load config {config_path}"))?;
    let mut tournament = Tournament::initialize(config)
        .with_context(|| format!("Failed to initialize tournament from {config_path}"))?;
    if let Some(kind) = options.strategy {
        tournament.set_strategy(kind);
    }
    Ok(tournament)
}

fn run_tournament(args: &[String]) -> anyhow::Result<()> {
    let Some(config_path) = args.first() else {
        print_usage();
        bail!("run requires a config path");
    };
    let options = parse_options(&args[1..])?;

    let mut tournament = load(config_path, &options)?;
    let seed = options.seed.or(tournament.config().seed);
    let mut rng = make_rng(seed);

    tournament.run(&options.assignment, &mut rng)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(tournament.win_record())?);
        return Ok(());
    }

    println!("=== {} ({}) ===", tournament, tournament.strategy_name());
    println!();
    for team in tournament.teams() {
        println!("{team}");
    }
    println!();
    println!("{}", match_report(tournament.matches()));
    println!("Win record:");
    print!("{}", tournament.win_record().render());
    println!();
    if let Some(champion) = tournament.champion() {
        let performance = champion.performance();
        println!("Champion: {champion}");
        println!(
            "Record: {} wins, {} losses, total score {:.1}",
            performance.wins, performance.losses, performance.score
        );
    }

    Ok(())
}

fn compare_strategies(args: &[String]) -> anyhow::Result<()> {
    let Some(config_path) = args.first() else {
        print_usage();
        bail!("compare requires a config path");
    };
    let mut options = parse_options(&args[1..])?;

    let mut tournament = load(config_path, &options)?;
    // Both strategies must see the same draw
    let seed = options
        .seed
        .or(tournament.config().seed)
        .unwrap_or_else(rand::random);
    options.seed = Some(seed);

    println!("=== Strategy comparison: {} (seed {}) ===", tournament, seed);
    println!();
    println!(
        "{:<10} {:>16} {:>16} {:<20}",
        "Strategy", "Opening score", "Champion score", "Champion"
    );
    println!("{}", "-".repeat(66));

    for kind in [StrategyKind::Greedy, StrategyKind::Knapsack] {
        tournament.set_strategy(kind);
        let mut rng = make_rng(Some(seed));

        tournament.assign_sponsors_and_budgets(&options.assignment, &mut rng)?;
        tournament.instantiate_teams()?;
        let opening: f64 = tournament
            .run_initial_purchases()
            .iter()
            .map(|t| t.score())
            .sum();
        let champion = tournament.run_bracket()?;

        println!(
            "{:<10} {:>16.1} {:>16.1} {:<20}",
            kind.to_string(),
            opening,
            champion.score(),
            champion.sponsor()
        );
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "run" => run_tournament(&args[2..]),
        "compare" => compare_strategies(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            bail!("unknown command: {other}")
        }
    }
}
