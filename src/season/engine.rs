//! Season state machine
//!
//! Every public call loads the saved state, advances exactly one unit of
//! work (one matchday or one playoff round), writes the artifacts and
//! persists the new state before returning. Nothing is saved when a call
//! fails, so the previous state stays authoritative.

use std::path::PathBuf;

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::LeagueConfig;
use crate::core::error::{LeagueError, Result};
use crate::core::types::{mix_seed, Conference};
use crate::game::form::seasonal_form;
use crate::game::{play_game, GameSetup, MatchResult};
use crate::lineup::{build_lineup, Lineup};
use crate::output::artifacts::{
    table_rows, ConferenceTables, DebugEntry, GameSummary, MatchdayArtifact,
    PlayoffRoundArtifact, ReplayArtifact, ReplayIndex, ReplayIndexEntry,
};
use crate::output::{build_snapshot, ArtifactWriter};
use crate::roster::League;
use crate::schedule::Fixture;

use super::playoffs::{pair_round, play_series, seed_bracket, SeriesResult};
use super::state::{HistoryEntry, Phase, SeasonState};
use super::stats::Category;
use super::store::StateStore;

/// A played game with the lineups that played it
#[derive(Debug, Clone)]
struct PlayedGame {
    conference: Conference,
    result: MatchResult,
    home_lineup: Lineup,
    away_lineup: Lineup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchdaySummary {
    pub season: u32,
    pub matchday: u32,
    pub results: Vec<GameSummary>,
    pub artifact: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub season: u32,
    pub round: u32,
    pub series: Vec<SeriesResult>,
    pub artifact: PathBuf,
}

/// What a call to the engine did
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    MatchdayPlayed(MatchdaySummary),
    /// No regular-season fixtures left; nothing was changed
    SeasonOver { season: u32 },
    /// Playoffs requested while regular-season fixtures remain
    RegularSeasonInProgress {
        season: u32,
        remaining_matchdays: usize,
    },
    PlayoffRoundPlayed(RoundSummary),
    /// Final round played, champion archived and the next season started
    Champion {
        season: u32,
        champion: String,
        round: RoundSummary,
        next_season: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonStatus {
    pub season: u32,
    pub phase: Phase,
    pub next_matchday: u32,
    pub total_matchdays: u32,
    pub remaining_north: usize,
    pub remaining_south: usize,
    pub playoff_round: u32,
    pub playoff_alive: Vec<String>,
    pub tables: ConferenceTables,
    pub history: Vec<HistoryEntry>,
}

pub struct SeasonEngine {
    config: LeagueConfig,
    league: League,
    store: StateStore,
    writer: ArtifactWriter,
}

impl SeasonEngine {
    /// Load the roster file named in the config and set up the engine
    pub fn new(config: LeagueConfig) -> Result<Self> {
        let league = League::load(&config.teams_file)?;
        Self::with_league(config, league)
    }

    pub fn with_league(config: LeagueConfig, league: League) -> Result<Self> {
        config.validate()?;
        league.validate()?;
        let seeds = config.playoffs.seeds_per_conference;
        for conference in Conference::ALL {
            let teams = league.teams(conference).len();
            if teams < seeds {
                return Err(LeagueError::Config(format!(
                    "{} has {} teams but the playoffs seed {} per conference",
                    conference.label(),
                    teams,
                    seeds
                )));
            }
        }
        let store = StateStore::in_data_root(&config.data_root);
        let writer = ArtifactWriter::new(&config.data_root);
        Ok(Self {
            config,
            league,
            store,
            writer,
        })
    }

    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    pub fn league(&self) -> &League {
        &self.league
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn writer(&self) -> &ArtifactWriter {
        &self.writer
    }

    /// Saved state, or a freshly initialised and persisted season
    pub fn load_or_init(&self) -> Result<SeasonState> {
        if let Some(state) = self.store.load()? {
            return Ok(state);
        }
        let season = self.writer.latest_season_on_disk().map_or(1, |s| s + 1);
        let state = SeasonState::new(season, &self.league, &self.config.storyline);
        tracing::info!(
            "Starting season {} ({} matchdays)",
            season,
            state.total_matchdays
        );
        self.store.save(&state)?;
        Ok(state)
    }

    fn rng_for(&self, season: u32, unit: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(mix_seed(
            self.config.seed,
            &[season as u64, unit, self.config.run_id],
        ))
    }

    fn play_fixture(
        &self,
        state: &SeasonState,
        fixture: &Fixture,
        form_matchday: u32,
        rng: &mut ChaCha8Rng,
    ) -> Result<(MatchResult, Lineup, Lineup)> {
        let home_team = self
            .league
            .team(&fixture.home)
            .ok_or_else(|| LeagueError::UnknownTeam(fixture.home.clone()))?;
        let away_team = self
            .league
            .team(&fixture.away)
            .ok_or_else(|| LeagueError::UnknownTeam(fixture.away.clone()))?;

        let home = build_lineup(home_team, &self.config.lineup, rng);
        let away = build_lineup(away_team, &self.config.lineup, rng);

        let engine = &self.config.engine;
        let form = |team: &str| {
            seasonal_form(
                team,
                form_matchday,
                state.total_matchdays,
                self.config.run_id,
                engine,
            )
        };
        let setup = GameSetup {
            home: &home,
            away: &away,
            home_momentum: state.momentum(&fixture.home),
            away_momentum: state.momentum(&fixture.away),
            home_form: form(&fixture.home),
            away_form: form(&fixture.away),
        };
        let result = play_game(setup, engine, rng)?;
        Ok((result, home, away))
    }

    /// Advance the regular season by one matchday
    pub fn simulate_matchday(&mut self) -> Result<Advance> {
        let mut state = self.load_or_init()?;
        if state.phase == Phase::Playoffs || state.regular_season_over() {
            tracing::info!("Season {} has no regular-season fixtures left", state.season);
            return Ok(Advance::SeasonOver {
                season: state.season,
            });
        }

        let matchday = state.matchday;
        let mut rng = self.rng_for(state.season, matchday as u64);
        let recent_len = self.config.engine.recent_results;
        let mut played = Vec::new();

        for conference in Conference::ALL {
            let fixtures = state.conference_mut(conference).take_matchday();
            for fixture in fixtures {
                let (result, home_lineup, away_lineup) =
                    self.play_fixture(&state, &fixture, matchday, &mut rng)?;
                state
                    .conference_mut(conference)
                    .standings
                    .apply(&result, recent_len)?;
                state.player_stats.record_replay(&result.replay);
                played.push(PlayedGame {
                    conference,
                    result,
                    home_lineup,
                    away_lineup,
                });
            }
        }
        state.matchday += 1;

        let results: Vec<GameSummary> = played
            .iter()
            .map(|g| GameSummary::new(g.conference, &g.result))
            .collect();
        let artifact = self.write_matchday_artifacts(&state, matchday, &played, &results)?;
        self.store.save(&state)?;

        tracing::info!(
            "Season {} matchday {} played ({} games)",
            state.season,
            matchday,
            results.len()
        );
        Ok(Advance::MatchdayPlayed(MatchdaySummary {
            season: state.season,
            matchday,
            results,
            artifact,
        }))
    }

    fn write_matchday_artifacts(
        &self,
        state: &SeasonState,
        matchday: u32,
        played: &[PlayedGame],
        results: &[GameSummary],
    ) -> Result<PathBuf> {
        let season = state.season;

        let replays: Vec<ReplayArtifact> = played
            .iter()
            .map(|g| ReplayArtifact::new(season, matchday, g.conference, &g.result))
            .collect();
        let index = ReplayIndex {
            season,
            matchday,
            games: results
                .iter()
                .map(|r| ReplayIndexEntry {
                    conference: r.conference,
                    home: r.home.clone(),
                    away: r.away.clone(),
                    result: r.result.clone(),
                    file: r.replay.clone(),
                })
                .collect(),
        };
        self.writer.write_replays(&replays, &index)?;

        let output = &self.config.output;
        let artifact = MatchdayArtifact {
            season,
            matchday,
            generated_at: Utc::now(),
            results: results.to_vec(),
            tables: ConferenceTables {
                north: table_rows(&state.north.standings),
                south: table_rows(&state.south.standings),
            },
            top_scorers: state.player_stats.leaders(Category::Points, output.top_scorers),
            debug: output.debug_panel.then(|| {
                played
                    .iter()
                    .map(|g| DebugEntry {
                        home: g.result.home.clone(),
                        away: g.result.away.clone(),
                        strength: g.result.strength.clone(),
                    })
                    .collect()
            }),
            lineups: output.lineup_snapshot.then(|| {
                played
                    .iter()
                    .flat_map(|g| [g.home_lineup.clone(), g.away_lineup.clone()])
                    .collect()
            }),
        };
        let path = self.writer.write_matchday(&artifact)?;

        let history = self.writer.read_matchdays(season, matchday)?;
        let snapshot = build_snapshot(state, matchday, &history, output.top_scorers);
        self.writer.write_snapshot(&snapshot)?;
        Ok(path)
    }

    /// Play one full playoff round, seeding the bracket first if needed
    pub fn simulate_playoff_round(&mut self) -> Result<Advance> {
        let mut state = self.load_or_init()?;
        if state.phase == Phase::Regular {
            if !state.regular_season_over() {
                let remaining = state
                    .north
                    .remaining_matchdays()
                    .max(state.south.remaining_matchdays());
                return Ok(Advance::RegularSeasonInProgress {
                    season: state.season,
                    remaining_matchdays: remaining,
                });
            }
            state.playoff_alive = seed_bracket(&state, self.config.playoffs.seeds_per_conference)?;
            state.phase = Phase::Playoffs;
            state.playoff_round = 0;
            tracing::info!(
                "Season {} playoffs seeded: {}",
                state.season,
                state
                    .playoff_alive
                    .iter()
                    .map(|s| s.team.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let round = state.playoff_round + 1;
        let mut rng = self.rng_for(state.season, (state.total_matchdays + round) as u64);
        let wins_needed = self.config.playoffs.wins_needed;
        let pairs = pair_round(&state.playoff_alive)?;

        let mut playoff_stats = std::mem::take(&mut state.playoff_stats);
        let mut series = Vec::with_capacity(pairs.len());
        for (higher, lower) in &pairs {
            let result = play_series(higher, lower, wins_needed, |home, away, _| {
                let fixture = Fixture::new(home, away);
                let (result, _, _) =
                    self.play_fixture(&state, &fixture, state.total_matchdays, &mut rng)?;
                playoff_stats.record_replay(&result.replay);
                Ok(result)
            })?;
            tracing::info!(
                "Round {}: {} def. {} ({})",
                round,
                result.winner,
                if result.winner == higher.team { &lower.team } else { &higher.team },
                result.result
            );
            series.push(result);
        }
        state.playoff_stats = playoff_stats;
        state.playoff_alive = series.iter().map(|s| s.winner_seed().clone()).collect();
        state.playoff_round = round;

        let champion = match state.playoff_alive.as_slice() {
            [only] => Some(only.team.clone()),
            _ => None,
        };
        let artifact = self.writer.write_playoff_round(&PlayoffRoundArtifact {
            season: state.season,
            round,
            generated_at: Utc::now(),
            series: series.clone(),
            champion: champion.clone(),
        })?;
        let summary = RoundSummary {
            season: state.season,
            round,
            series,
            artifact,
        };

        if let Some(champion) = champion {
            state.history.push(HistoryEntry {
                season: state.season,
                champion: champion.clone(),
                finished_at: Utc::now(),
            });
            let next = state.next_season(&self.league, &self.config.storyline);
            self.store.save(&next)?;
            tracing::info!("{} win season {}", champion, state.season);
            return Ok(Advance::Champion {
                season: state.season,
                champion,
                round: summary,
                next_season: next.season,
            });
        }

        self.store.save(&state)?;
        Ok(Advance::PlayoffRoundPlayed(summary))
    }

    /// Play playoff rounds until a champion is crowned
    pub fn run_playoffs(&mut self) -> Result<Advance> {
        loop {
            match self.simulate_playoff_round()? {
                Advance::PlayoffRoundPlayed(_) => continue,
                other => return Ok(other),
            }
        }
    }

    /// Play every remaining matchday, then the playoffs
    pub fn run_season(&mut self) -> Result<Advance> {
        loop {
            match self.simulate_matchday()? {
                Advance::MatchdayPlayed(_) => continue,
                _ => break,
            }
        }
        self.run_playoffs()
    }

    pub fn status(&self) -> Result<SeasonStatus> {
        let state = self.load_or_init()?;
        Ok(SeasonStatus {
            season: state.season,
            phase: state.phase,
            next_matchday: state.matchday,
            total_matchdays: state.total_matchdays,
            remaining_north: state.north.remaining_matchdays(),
            remaining_south: state.south.remaining_matchdays(),
            playoff_round: state.playoff_round,
            playoff_alive: state.playoff_alive.iter().map(|s| s.team.clone()).collect(),
            tables: ConferenceTables {
                north: table_rows(&state.north.standings),
                south: table_rows(&state.south.standings),
            },
            history: state.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::fixtures;
    use tempfile::TempDir;

    fn engine(dir: &TempDir, per_conference: usize) -> SeasonEngine {
        let config = LeagueConfig {
            data_root: dir.path().to_path_buf(),
            ..LeagueConfig::default()
        };
        SeasonEngine::with_league(config, fixtures::league(per_conference)).unwrap()
    }

    #[test]
    fn test_first_matchday_advances_counter() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 6);
        let advance = engine.simulate_matchday().unwrap();
        let Advance::MatchdayPlayed(summary) = advance else {
            panic!("expected a played matchday");
        };
        assert_eq!(summary.matchday, 1);
        assert_eq!(summary.results.len(), 6);
        let state = engine.store().load().unwrap().unwrap();
        assert_eq!(state.matchday, 2);
        assert_eq!(state.north.fixtures.len(), 27);
    }

    #[test]
    fn test_conference_smaller_than_bracket_rejected() {
        let dir = TempDir::new().unwrap();
        let mut league = fixtures::league(4);
        league.south.truncate(3);
        let config = LeagueConfig {
            data_root: dir.path().to_path_buf(),
            ..LeagueConfig::default()
        };
        let result = SeasonEngine::with_league(config.clone(), league.clone());
        assert!(matches!(result, Err(LeagueError::Config(_))));
        assert!(!dir.path().join("saves").exists());

        let mut smaller_bracket = config;
        smaller_bracket.playoffs.seeds_per_conference = 2;
        assert!(SeasonEngine::with_league(smaller_bracket, league).is_ok());
    }

    #[test]
    fn test_playoffs_wait_for_regular_season() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 4);
        let advance = engine.simulate_playoff_round().unwrap();
        assert_eq!(
            advance,
            Advance::RegularSeasonInProgress {
                season: 1,
                remaining_matchdays: 6
            }
        );
    }

    #[test]
    fn test_status_initialises_fresh_season() {
        let dir = TempDir::new().unwrap();
        let engine = engine(&dir, 4);
        let status = engine.status().unwrap();
        assert_eq!(status.season, 1);
        assert_eq!(status.phase, Phase::Regular);
        assert_eq!(status.remaining_north, 6);
        assert!(engine.store().path().exists());
    }

    #[test]
    fn test_same_seed_same_matchday() {
        let a_dir = TempDir::new().unwrap();
        let b_dir = TempDir::new().unwrap();
        let mut a = engine(&a_dir, 4);
        let mut b = engine(&b_dir, 4);
        let Advance::MatchdayPlayed(ra) = a.simulate_matchday().unwrap() else {
            panic!("expected a played matchday");
        };
        let Advance::MatchdayPlayed(rb) = b.simulate_matchday().unwrap() else {
            panic!("expected a played matchday");
        };
        assert_eq!(ra.results, rb.results);
    }
}
