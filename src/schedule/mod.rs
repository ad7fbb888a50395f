//! Season schedule generation
//!
//! Double round robin via the circle method: one team stays fixed while the
//! rest rotate, each rotation producing one matchday. The second cycle
//! repeats the first with home and away swapped.

pub mod storyline;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::config::StorylineConfig;

pub use storyline::{apply_storyline, StorylineOutcome};

/// One scheduled game
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    pub home: String,
    pub away: String,
}

impl Fixture {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }

    pub fn flipped(&self) -> Self {
        Self {
            home: self.away.clone(),
            away: self.home.clone(),
        }
    }

    /// True when both fixtures are between the same two teams
    pub fn same_pair(&self, other: &Fixture) -> bool {
        (self.home == other.home && self.away == other.away)
            || (self.home == other.away && self.away == other.home)
    }
}

/// Flat fixture list consumed in fixed-size matchday chunks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub games_per_matchday: usize,
    pub fixtures: Vec<Fixture>,
}

impl Schedule {
    /// Generate the schedule for one conference and apply the storyline pass
    pub fn generate(teams: &[String], storyline: &StorylineConfig) -> Self {
        let mut rounds = round_robin_rounds(teams);
        match apply_storyline(&mut rounds, teams, storyline) {
            StorylineOutcome::Applied { swapped_round } => {
                tracing::debug!(
                    "Storyline constraints applied (matchday swap: {:?})",
                    swapped_round.map(|r| r + 1)
                );
            }
            StorylineOutcome::Skipped(reason) => {
                tracing::debug!("Storyline constraints skipped: {}", reason);
            }
        }
        Self::from_rounds(teams.len() / 2, rounds)
    }

    pub fn from_rounds(games_per_matchday: usize, rounds: Vec<Vec<Fixture>>) -> Self {
        Self {
            games_per_matchday,
            fixtures: rounds.into_iter().flatten().collect(),
        }
    }

    pub fn matchday_count(&self) -> usize {
        if self.games_per_matchday == 0 {
            0
        } else {
            self.fixtures.len().div_ceil(self.games_per_matchday)
        }
    }

    /// Fixtures of a 1-based matchday
    pub fn matchday(&self, matchday: usize) -> &[Fixture] {
        if matchday == 0 || self.games_per_matchday == 0 {
            return &[];
        }
        let start = (matchday - 1) * self.games_per_matchday;
        let end = (start + self.games_per_matchday).min(self.fixtures.len());
        self.fixtures.get(start..end).unwrap_or(&[])
    }

    pub fn into_queue(self) -> VecDeque<Fixture> {
        self.fixtures.into()
    }
}

/// Circle-method double round robin, one inner vector per matchday.
///
/// An odd team count is padded with a bye; games against the bye are
/// dropped, so every matchday still holds `teams.len() / 2` games.
pub fn round_robin_rounds(teams: &[String]) -> Vec<Vec<Fixture>> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<&str>> = teams.iter().map(|t| Some(t.as_str())).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();
    let half = n / 2;
    let cycle = n - 1;

    let mut rounds = Vec::with_capacity(cycle * 2);
    for day in 0..cycle * 2 {
        let mut round = Vec::with_capacity(half);
        for i in 0..half {
            if let (Some(a), Some(b)) = (slots[i], slots[n - 1 - i]) {
                if day % 2 == 0 {
                    round.push(Fixture::new(a, b));
                } else {
                    round.push(Fixture::new(b, a));
                }
            }
        }
        rounds.push(round);
        // Keep slot 0 fixed and rotate the rest by one
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }
    rounds
}
