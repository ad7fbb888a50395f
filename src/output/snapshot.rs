//! League snapshot recomputed after every matchday
//!
//! Standings and leaderboards come from the season state. Streaks and the
//! extremal games are rebuilt by scanning every matchday artifact of the
//! season, so the snapshot never depends on a window kept in the state.

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::season::state::SeasonState;
use crate::season::stats::{Category, LeaderEntry};

use super::artifacts::{table_rows, ConferenceTables, GameSummary, MatchdayArtifact};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboards {
    pub points: Vec<LeaderEntry>,
    pub goals: Vec<LeaderEntry>,
    pub assists: Vec<LeaderEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakEntry {
    pub team: String,
    pub wins: u32,
}

/// A single game singled out by the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotableGame {
    pub matchday: u32,
    pub home: String,
    pub away: String,
    pub result: String,
    pub total_goals: u32,
    pub margin: u32,
}

impl NotableGame {
    fn new(matchday: u32, game: &GameSummary) -> Self {
        Self {
            matchday,
            home: game.home.clone(),
            away: game.away.clone(),
            result: game.result.clone(),
            total_goals: game.total_goals(),
            margin: game.margin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub season: u32,
    pub after_matchday: u32,
    pub generated_at: DateTime<Utc>,
    pub standings: ConferenceTables,
    pub leaders: Leaderboards,
    pub longest_win_streak: Option<StreakEntry>,
    pub highest_scoring_game: Option<NotableGame>,
    pub biggest_blowout: Option<NotableGame>,
}

/// Current winning run per team, games read in matchday order
fn current_win_streaks(matchdays: &[MatchdayArtifact]) -> AHashMap<&str, u32> {
    let mut streaks: AHashMap<&str, u32> = AHashMap::new();
    for artifact in matchdays {
        for game in &artifact.results {
            let loser = if game.winner == game.home {
                &game.away
            } else {
                &game.home
            };
            *streaks.entry(game.winner.as_str()).or_insert(0) += 1;
            streaks.insert(loser.as_str(), 0);
        }
    }
    streaks
}

/// Build the snapshot from the state and every matchday artifact so far.
///
/// `matchdays` must be sorted by matchday. Earlier games win ties for the
/// extremal entries.
pub fn build_snapshot(
    state: &SeasonState,
    after_matchday: u32,
    matchdays: &[MatchdayArtifact],
    leaders: usize,
) -> LeagueSnapshot {
    let stats = &state.player_stats;

    let longest_win_streak = current_win_streaks(matchdays)
        .into_iter()
        .filter(|(_, wins)| *wins > 0)
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(team, wins)| StreakEntry {
            team: team.to_string(),
            wins,
        });

    let mut highest: Option<NotableGame> = None;
    let mut blowout: Option<NotableGame> = None;
    for artifact in matchdays {
        for game in &artifact.results {
            if highest.as_ref().map_or(true, |h| game.total_goals() > h.total_goals) {
                highest = Some(NotableGame::new(artifact.matchday, game));
            }
            if blowout.as_ref().map_or(true, |b| game.margin() > b.margin) {
                blowout = Some(NotableGame::new(artifact.matchday, game));
            }
        }
    }

    LeagueSnapshot {
        season: state.season,
        after_matchday,
        generated_at: Utc::now(),
        standings: ConferenceTables {
            north: table_rows(&state.north.standings),
            south: table_rows(&state.south.standings),
        },
        leaders: Leaderboards {
            points: stats.leaders(Category::Points, leaders),
            goals: stats.leaders(Category::Goals, leaders),
            assists: stats.leaders(Category::Assists, leaders),
        },
        longest_win_streak,
        highest_scoring_game: highest,
        biggest_blowout: blowout,
    }
}
