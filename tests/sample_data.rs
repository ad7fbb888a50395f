//! The bundled config and roster load and drive a matchday

use std::path::PathBuf;

use tempfile::TempDir;

use highspeed_league::core::types::Conference;
use highspeed_league::roster::League;
use highspeed_league::schedule::Schedule;
use highspeed_league::{Advance, LeagueConfig, SeasonEngine};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn test_bundled_config_loads() {
    let config = LeagueConfig::load(&data_dir().join("league.toml")).unwrap();
    assert_eq!(config.data_root, data_dir().join("run"));
    assert_eq!(config.teams_file, data_dir().join("teams.json"));
    assert_eq!(config.playoffs.wins_needed, 4);
}

#[test]
fn test_bundled_roster_schedules_storyline() {
    let config = LeagueConfig::load(&data_dir().join("league.toml")).unwrap();
    let league = League::load(&config.teams_file).unwrap();
    assert_eq!(league.north.len(), 7);
    assert_eq!(league.south.len(), 8);

    let south = Schedule::generate(&league.team_names(Conference::South), &config.storyline);
    let focus: Vec<_> = south
        .fixtures
        .iter()
        .filter(|f| f.involves("Löwen Frankfurt"))
        .collect();
    assert_eq!(focus.len(), 14);
    assert_eq!(focus[2].home, "Löwen Frankfurt");
    assert_eq!(focus[2].away, "Adler Mannheim");
}

#[test]
fn test_bundled_league_plays_a_matchday() {
    let dir = TempDir::new().unwrap();
    let mut config = LeagueConfig::load(&data_dir().join("league.toml")).unwrap();
    config.data_root = dir.path().to_path_buf();
    let mut engine = SeasonEngine::new(config).unwrap();

    let Advance::MatchdayPlayed(summary) = engine.simulate_matchday().unwrap() else {
        panic!("expected a played matchday");
    };
    // Seven north teams leave one on a bye
    assert_eq!(summary.results.len(), 3 + 4);
}
