//! Highspeed League - Entry Point
//!
//! Command-line control surface for the season engine. Each subcommand
//! loads the saved season, advances it and exits.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use highspeed_league::core::error::Result;
use highspeed_league::output::artifacts::TableRow;
use highspeed_league::season::playoffs::SeriesResult;
use highspeed_league::{Advance, LeagueConfig, SeasonEngine, SeasonStatus};

/// Highspeed League season simulator
#[derive(Parser, Debug)]
#[command(name = "highspeed")]
#[command(about = "Simulate a two-conference hockey league one matchday at a time")]
struct Args {
    /// League config file (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the data root from the config
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Override the roster file from the config
    #[arg(long)]
    teams: Option<PathBuf>,

    /// Override the run id (re-rolls seasonal form and game draws)
    #[arg(long)]
    run_id: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate the next regular-season matchday
    Matchday,
    /// Simulate the next playoff round
    PlayoffRound,
    /// Run all remaining playoff rounds and roll over to the next season
    Playoffs,
    /// Run the rest of the season including playoffs
    Season,
    /// Show the current season state
    Status,
}

fn load_config(args: &Args) -> Result<LeagueConfig> {
    let mut config = match &args.config {
        Some(path) => LeagueConfig::load(path)?,
        None => LeagueConfig::new(),
    };
    if let Some(root) = &args.data_root {
        config.data_root = root.clone();
    }
    if let Some(teams) = &args.teams {
        config.teams_file = teams.clone();
    }
    if let Some(run_id) = args.run_id {
        config.run_id = run_id;
    }
    Ok(config)
}

fn print_series(series: &[SeriesResult]) {
    for s in series {
        let games: Vec<String> = s
            .games
            .iter()
            .map(|g| format!("{}:{}", g.home_goals, g.away_goals))
            .collect();
        println!(
            "  ({}{}) {} vs ({}{}) {}  ->  {} {}  [{}]",
            s.higher_seed.conference.label().chars().next().unwrap_or('?'),
            s.higher_seed.seed,
            s.higher_seed.team,
            s.lower_seed.conference.label().chars().next().unwrap_or('?'),
            s.lower_seed.seed,
            s.lower_seed.team,
            s.winner,
            s.result,
            games.join(", ")
        );
    }
}

fn print_table(title: &str, rows: &[TableRow]) {
    println!("{}", title);
    for row in rows {
        println!(
            "  {:>2}. {:<28} {:>3} GP {:>4} PTS {:>4}:{:<4} {}",
            row.rank,
            row.team,
            row.games,
            row.points,
            row.goals_for,
            row.goals_against,
            row.streak.as_deref().unwrap_or("-")
        );
    }
}

fn print_advance(advance: &Advance) {
    match advance {
        Advance::MatchdayPlayed(summary) => {
            println!("Season {} - Matchday {}", summary.season, summary.matchday);
            for game in &summary.results {
                println!("  {} - {}  {}", game.home, game.away, game.result);
            }
            println!("Artifact: {}", summary.artifact.display());
        }
        Advance::SeasonOver { season } => {
            println!("Season {}: regular season is over, play the playoffs next", season);
        }
        Advance::RegularSeasonInProgress {
            season,
            remaining_matchdays,
        } => {
            println!(
                "Season {}: {} matchdays left before the playoffs",
                season, remaining_matchdays
            );
        }
        Advance::PlayoffRoundPlayed(round) => {
            println!("Season {} - Playoff round {}", round.season, round.round);
            print_series(&round.series);
        }
        Advance::Champion {
            season,
            champion,
            round,
            next_season,
        } => {
            println!("Season {} - Final", season);
            print_series(&round.series);
            println!("Champion: {}", champion);
            println!("Season {} is ready", next_season);
        }
    }
}

fn print_status(status: &SeasonStatus) {
    println!(
        "Season {} ({:?}) - next matchday {}/{}",
        status.season, status.phase, status.next_matchday, status.total_matchdays
    );
    println!(
        "Remaining matchdays: north {}, south {}",
        status.remaining_north, status.remaining_south
    );
    if !status.playoff_alive.is_empty() {
        println!(
            "Playoff round {} completed, alive: {}",
            status.playoff_round,
            status.playoff_alive.join(", ")
        );
    }
    print_table("North", &status.tables.north);
    print_table("South", &status.tables.south);
    for entry in &status.history {
        println!("  Season {}: {}", entry.season, entry.champion);
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let mut engine = SeasonEngine::new(config)?;

    match args.command {
        Command::Matchday => print_advance(&engine.simulate_matchday()?),
        Command::PlayoffRound => print_advance(&engine.simulate_playoff_round()?),
        Command::Playoffs => print_advance(&engine.run_playoffs()?),
        Command::Season => print_advance(&engine.run_season()?),
        Command::Status => print_status(&engine.status()?),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("highspeed=info,highspeed_league=info")),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            if e.is_recoverable() {
                tracing::info!("Saved season state is unchanged; fix the problem and re-run");
            }
            ExitCode::FAILURE
        }
    }
}
