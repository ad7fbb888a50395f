//! Persisted season aggregate

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::config::StorylineConfig;
use crate::core::types::Conference;
use crate::roster::League;
use crate::schedule::{Fixture, Schedule};

use super::standings::Standings;
use super::stats::PlayerStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Regular,
    Playoffs,
}

/// One conference's table and its unplayed fixtures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceState {
    pub standings: Standings,
    pub fixtures: VecDeque<Fixture>,
    pub games_per_matchday: usize,
}

impl ConferenceState {
    pub fn new(conference: Conference, teams: &[String], storyline: &StorylineConfig) -> Self {
        let schedule = Schedule::generate(teams, storyline);
        Self {
            standings: Standings::new(conference, teams),
            games_per_matchday: schedule.games_per_matchday,
            fixtures: schedule.into_queue(),
        }
    }

    /// Pop the next matchday's fixtures off the queue
    pub fn take_matchday(&mut self) -> Vec<Fixture> {
        let n = self.games_per_matchday.min(self.fixtures.len());
        self.fixtures.drain(..n).collect()
    }

    pub fn remaining_matchdays(&self) -> usize {
        if self.games_per_matchday == 0 {
            0
        } else {
            self.fixtures.len().div_ceil(self.games_per_matchday)
        }
    }
}

/// A team still alive in the playoffs with its regular-season seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffSeed {
    pub team: String,
    pub conference: Conference,
    pub seed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub season: u32,
    pub champion: String,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonState {
    pub season: u32,
    /// Next matchday to be played, starting at 1
    pub matchday: u32,
    /// Matchdays of the longer conference schedule
    pub total_matchdays: u32,
    pub north: ConferenceState,
    pub south: ConferenceState,
    pub player_stats: PlayerStats,
    pub playoff_stats: PlayerStats,
    pub phase: Phase,
    /// Last completed playoff round, 0 before the first
    pub playoff_round: u32,
    /// Surviving teams in bracket order; adjacent entries meet next round
    pub playoff_alive: Vec<PlayoffSeed>,
    pub history: Vec<HistoryEntry>,
}

impl SeasonState {
    /// Fresh regular season with newly generated schedules
    pub fn new(season: u32, league: &League, storyline: &StorylineConfig) -> Self {
        let north = ConferenceState::new(
            Conference::North,
            &league.team_names(Conference::North),
            storyline,
        );
        let south = ConferenceState::new(
            Conference::South,
            &league.team_names(Conference::South),
            storyline,
        );
        let total_matchdays = north.remaining_matchdays().max(south.remaining_matchdays()) as u32;
        Self {
            season,
            matchday: 1,
            total_matchdays,
            north,
            south,
            player_stats: PlayerStats::new(),
            playoff_stats: PlayerStats::new(),
            phase: Phase::Regular,
            playoff_round: 0,
            playoff_alive: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Start the next season, carrying the history forward
    pub fn next_season(&self, league: &League, storyline: &StorylineConfig) -> Self {
        let mut next = Self::new(self.season + 1, league, storyline);
        next.history = self.history.clone();
        next
    }

    pub fn conference(&self, conference: Conference) -> &ConferenceState {
        match conference {
            Conference::North => &self.north,
            Conference::South => &self.south,
        }
    }

    pub fn conference_mut(&mut self, conference: Conference) -> &mut ConferenceState {
        match conference {
            Conference::North => &mut self.north,
            Conference::South => &mut self.south,
        }
    }

    pub fn regular_season_over(&self) -> bool {
        self.north.fixtures.is_empty() && self.south.fixtures.is_empty()
    }

    pub fn momentum(&self, team: &str) -> u32 {
        self.north
            .standings
            .get(team)
            .or_else(|| self.south.standings.get(team))
            .map_or(0, |r| r.momentum)
    }

    pub fn champion_of(&self, season: u32) -> Option<&str> {
        self.history
            .iter()
            .find(|h| h.season == season)
            .map(|h| h.champion.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::fixtures;

    fn storyline_off() -> StorylineConfig {
        StorylineConfig {
            enabled: false,
            ..StorylineConfig::default()
        }
    }

    #[test]
    fn test_new_season_queues_full_schedule() {
        let league = fixtures::league(6);
        let state = SeasonState::new(1, &league, &storyline_off());
        assert_eq!(state.north.fixtures.len(), 30);
        assert_eq!(state.south.games_per_matchday, 3);
        assert_eq!(state.total_matchdays, 10);
        assert_eq!(state.matchday, 1);
        assert_eq!(state.phase, Phase::Regular);
        assert!(!state.regular_season_over());
    }

    #[test]
    fn test_take_matchday_pops_one_chunk() {
        let league = fixtures::league(4);
        let mut state = SeasonState::new(1, &league, &storyline_off());
        let games = state.north.take_matchday();
        assert_eq!(games.len(), 2);
        assert_eq!(state.north.fixtures.len(), 10);
        assert_eq!(state.north.remaining_matchdays(), 5);
    }

    #[test]
    fn test_state_json_round_trip_is_stable() {
        let league = fixtures::league(4);
        let mut state = SeasonState::new(3, &league, &storyline_off());
        state.history.push(HistoryEntry {
            season: 2,
            champion: "North 0".into(),
            finished_at: Utc::now(),
        });
        let first = serde_json::to_string_pretty(&state).unwrap();
        let loaded: SeasonState = serde_json::from_str(&first).unwrap();
        let second = serde_json::to_string_pretty(&loaded).unwrap();
        assert_eq!(first, second);
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_next_season_keeps_history() {
        let league = fixtures::league(4);
        let mut state = SeasonState::new(1, &league, &storyline_off());
        state.history.push(HistoryEntry {
            season: 1,
            champion: "South 1".into(),
            finished_at: Utc::now(),
        });
        let next = state.next_season(&league, &storyline_off());
        assert_eq!(next.season, 2);
        assert_eq!(next.champion_of(1), Some("South 1"));
        assert_eq!(next.north.standings.total_points(), 0);
    }
}
