//! Season engine integration tests against a temporary data root

mod common;

use std::collections::HashMap;

use tempfile::TempDir;

use highspeed_league::core::types::Conference;
use highspeed_league::output::ArtifactWriter;
use highspeed_league::season::{Phase, StateStore};
use highspeed_league::{Advance, LeagueError, SeasonEngine};

#[test]
fn test_six_team_conference_season_length() {
    let dir = TempDir::new().unwrap();
    let mut engine = common::engine(dir.path(), 6);

    let mut matchdays = 0;
    let mut games = 0;
    loop {
        match engine.simulate_matchday().unwrap() {
            Advance::MatchdayPlayed(summary) => {
                matchdays += 1;
                games += summary
                    .results
                    .iter()
                    .filter(|g| g.conference == Conference::North)
                    .count();
                if matchdays == 1 {
                    let state = engine.store().load().unwrap().unwrap();
                    assert_eq!(state.matchday, 2);
                }
            }
            Advance::SeasonOver { .. } => break,
            other => panic!("unexpected {:?}", other),
        }
    }
    assert_eq!(matchdays, 10);
    assert_eq!(games, 30);
}

#[test]
fn test_season_over_does_not_mutate() {
    let dir = TempDir::new().unwrap();
    let mut engine = common::engine(dir.path(), 4);
    while let Advance::MatchdayPlayed(_) = engine.simulate_matchday().unwrap() {}

    let before = std::fs::read(engine.store().path()).unwrap();
    let advance = engine.simulate_matchday().unwrap();
    assert_eq!(advance, Advance::SeasonOver { season: 1 });
    let after = std::fs::read(engine.store().path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_standings_match_replay_goals() {
    let dir = TempDir::new().unwrap();
    let mut engine = common::engine(dir.path(), 4);
    for _ in 0..4 {
        engine.simulate_matchday().unwrap();
    }

    let writer = ArtifactWriter::new(dir.path());
    let mut goals: HashMap<String, u32> = HashMap::new();
    let mut player_goals = 0;
    for matchday in 1..=4 {
        let index = writer.read_replay_index(1, matchday).unwrap();
        for entry in &index.games {
            let replay = writer.read_replay(1, matchday, &entry.file).unwrap();
            *goals.entry(replay.home.clone()).or_default() += replay.goals_for(&replay.home);
            *goals.entry(replay.away.clone()).or_default() += replay.goals_for(&replay.away);
            player_goals += replay
                .events
                .iter()
                .filter(|e| e.goal.as_ref().map_or(false, |g| g.scorer.is_some()))
                .count() as u32;
        }
    }

    let state = engine.store().load().unwrap().unwrap();
    for conference in Conference::ALL {
        for row in &state.conference(conference).standings.rows {
            assert_eq!(Some(&row.goals_for), goals.get(&row.name), "{}", row.name);
            assert_eq!(row.games, 4);
        }
    }
    assert_eq!(state.player_stats.total_goals(), player_goals);
}

#[test]
fn test_points_sum_to_three_per_game() {
    let dir = TempDir::new().unwrap();
    let mut engine = common::engine(dir.path(), 6);
    for _ in 0..3 {
        engine.simulate_matchday().unwrap();
    }
    let state = engine.store().load().unwrap().unwrap();
    for conference in Conference::ALL {
        let table = &state.conference(conference).standings;
        let games: u32 = table.rows.iter().map(|r| r.games).sum::<u32>() / 2;
        assert_eq!(table.total_points(), games * 3);
    }
}

#[test]
fn test_corrupt_save_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut engine = common::engine(dir.path(), 4);
    engine.simulate_matchday().unwrap();

    std::fs::write(engine.store().path(), "{ not json").unwrap();
    let err = engine.simulate_matchday().unwrap_err();
    assert!(matches!(err, LeagueError::CorruptState { .. }));
    // Nothing was overwritten
    let content = std::fs::read_to_string(engine.store().path()).unwrap();
    assert_eq!(content, "{ not json");
}

#[test]
fn test_artifacts_written_for_matchday() {
    let dir = TempDir::new().unwrap();
    let mut engine = common::engine(dir.path(), 4);
    engine.simulate_matchday().unwrap();

    let writer = ArtifactWriter::new(dir.path());
    let artifact = writer.read_matchday(1, 1).unwrap();
    assert_eq!(artifact.results.len(), 4);
    assert_eq!(artifact.tables.north.len(), 4);
    assert!(artifact.debug.is_some());
    assert_eq!(artifact.lineups.as_ref().map(|l| l.len()), Some(8));

    let snapshot_dir = writer.snapshot_dir(1);
    assert!(snapshot_dir.join("after_matchday_01.json").exists());
    assert!(snapshot_dir.join("latest.json").exists());
}

#[test]
fn test_fresh_season_number_follows_existing_artifacts() {
    let dir = TempDir::new().unwrap();
    let writer = ArtifactWriter::new(dir.path());
    std::fs::create_dir_all(writer.matchday_dir(3)).unwrap();

    let engine = common::engine(dir.path(), 4);
    let status = engine.status().unwrap();
    assert_eq!(status.season, 4);
    assert_eq!(status.phase, Phase::Regular);
}

#[test]
fn test_engine_resumes_from_saved_state() {
    let dir = TempDir::new().unwrap();
    {
        let mut engine = common::engine(dir.path(), 4);
        engine.simulate_matchday().unwrap();
        engine.simulate_matchday().unwrap();
    }
    let mut engine = SeasonEngine::with_league(common::config(dir.path()), common::league(4)).unwrap();
    let Advance::MatchdayPlayed(summary) = engine.simulate_matchday().unwrap() else {
        panic!("expected a played matchday");
    };
    assert_eq!(summary.matchday, 3);

    let state = StateStore::in_data_root(dir.path()).load().unwrap().unwrap();
    assert_eq!(state.matchday, 4);
}

#[test]
fn test_run_id_changes_results() {
    let a_dir = TempDir::new().unwrap();
    let b_dir = TempDir::new().unwrap();
    let mut a = common::engine(a_dir.path(), 6);
    let mut config = common::config(b_dir.path());
    config.run_id = 7;
    let mut b = SeasonEngine::with_league(config, common::league(6)).unwrap();

    let mut differs = false;
    for _ in 0..3 {
        let (Advance::MatchdayPlayed(ra), Advance::MatchdayPlayed(rb)) =
            (a.simulate_matchday().unwrap(), b.simulate_matchday().unwrap())
        else {
            panic!("expected played matchdays");
        };
        let fixtures_a: Vec<_> = ra.results.iter().map(|g| (&g.home, &g.away)).collect();
        let fixtures_b: Vec<_> = rb.results.iter().map(|g| (&g.home, &g.away)).collect();
        assert_eq!(fixtures_a, fixtures_b);
        differs |= ra.results != rb.results;
    }
    assert!(differs);
}
