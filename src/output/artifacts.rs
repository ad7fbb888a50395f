//! Documents written after each unit of work
//!
//! These are the inputs of the downstream narrative and export tools, so
//! field names stay stable and every document is plain JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{slugify, Conference};
use crate::game::replay::ReplayEvent;
use crate::game::{Decision, MatchResult, ScoreLine, StrengthPanel};
use crate::lineup::Lineup;
use crate::season::playoffs::SeriesResult;
use crate::season::standings::{ResultMark, Standings};
use crate::season::stats::LeaderEntry;

/// One game as listed in a matchday artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub conference: Conference,
    pub home: String,
    pub away: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub regulation: ScoreLine,
    pub overtime: bool,
    pub shootout: bool,
    pub result: String,
    pub winner: String,
    /// Replay file name within the matchday replay directory
    pub replay: String,
}

impl GameSummary {
    pub fn new(conference: Conference, result: &MatchResult) -> Self {
        Self {
            conference,
            home: result.home.clone(),
            away: result.away.clone(),
            home_goals: result.final_score.home,
            away_goals: result.final_score.away,
            regulation: result.regulation,
            overtime: result.overtime(),
            shootout: result.shootout(),
            result: result.score_label(),
            winner: result.winner().to_string(),
            replay: replay_file_name(&result.home, &result.away),
        }
    }

    pub fn total_goals(&self) -> u32 {
        self.home_goals + self.away_goals
    }

    pub fn margin(&self) -> u32 {
        self.home_goals.abs_diff(self.away_goals)
    }
}

pub fn replay_file_name(home: &str, away: &str) -> String {
    format!("{}-{}.json", slugify(home), slugify(away))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub rank: u32,
    pub team: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ot_losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub streak: Option<String>,
    pub recent: Vec<ResultMark>,
}

pub fn table_rows(standings: &Standings) -> Vec<TableRow> {
    standings
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(i, row)| TableRow {
            rank: i as u32 + 1,
            team: row.name.clone(),
            games: row.games,
            wins: row.wins,
            losses: row.losses,
            ot_losses: row.ot_losses,
            points: row.points,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            goal_difference: row.goal_difference(),
            streak: row.streak(),
            recent: row.recent.iter().copied().collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceTables {
    pub north: Vec<TableRow>,
    pub south: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugEntry {
    pub home: String,
    pub away: String,
    #[serde(flatten)]
    pub strength: StrengthPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchdayArtifact {
    pub season: u32,
    pub matchday: u32,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<GameSummary>,
    pub tables: ConferenceTables,
    pub top_scorers: Vec<LeaderEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<Vec<DebugEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineups: Option<Vec<Lineup>>,
}

/// Full event log of one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayArtifact {
    pub season: u32,
    pub matchday: u32,
    pub conference: Conference,
    pub home: String,
    pub away: String,
    pub final_score: ScoreLine,
    pub decision: Decision,
    pub events: Vec<ReplayEvent>,
}

impl ReplayArtifact {
    pub fn new(season: u32, matchday: u32, conference: Conference, result: &MatchResult) -> Self {
        Self {
            season,
            matchday,
            conference,
            home: result.home.clone(),
            away: result.away.clone(),
            final_score: result.final_score,
            decision: result.decision,
            events: result.replay.events.clone(),
        }
    }

    /// Goals credited to `team` in this log
    pub fn goals_for(&self, team: &str) -> u32 {
        self.events
            .iter()
            .filter(|e| e.is_goal() && e.team == team)
            .count() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayIndexEntry {
    pub conference: Conference,
    pub home: String,
    pub away: String,
    pub result: String,
    pub file: String,
}

/// Lists every replay of one matchday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayIndex {
    pub season: u32,
    pub matchday: u32,
    pub games: Vec<ReplayIndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffRoundArtifact {
    pub season: u32,
    pub round: u32,
    pub generated_at: DateTime<Utc>,
    pub series: Vec<SeriesResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_file_name_is_slugged() {
        assert_eq!(
            replay_file_name("Löwen Frankfurt", "Adler Mannheim"),
            "loewen-frankfurt-adler-mannheim.json"
        );
    }

    #[test]
    fn test_table_rows_are_ranked() {
        let mut standings = Standings::new(
            Conference::South,
            &["Haie".to_string(), "Adler".to_string()],
        );
        standings.rows[1].points = 6;
        let rows = table_rows(&standings);
        assert_eq!(rows[0].team, "Adler");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].streak, None);
    }
}
