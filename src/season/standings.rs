//! Conference standings accumulator
//!
//! Rows are mutated in place game by game during a matchday, so later
//! games see the momentum earned by earlier ones.

use std::cmp::Reverse;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::error::{LeagueError, Result};
use crate::core::types::{Conference, Side};
use crate::game::MatchResult;

/// Outcome of one game from a team's point of view
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultMark {
    W,
    L,
    OTW,
    OTL,
}

impl ResultMark {
    pub fn is_win(&self) -> bool {
        matches!(self, ResultMark::W | ResultMark::OTW)
    }

    pub fn of(result: &MatchResult, side: Side) -> Self {
        let won = result.winner_side() == side;
        match (result.decision.extra_time(), won) {
            (false, true) => ResultMark::W,
            (false, false) => ResultMark::L,
            (true, true) => ResultMark::OTW,
            (true, false) => ResultMark::OTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub conference: Conference,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ot_losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub momentum: u32,
    /// Newest mark last
    pub recent: VecDeque<ResultMark>,
}

impl Standing {
    pub fn new(name: impl Into<String>, conference: Conference) -> Self {
        Self {
            name: name.into(),
            conference,
            games: 0,
            wins: 0,
            losses: 0,
            ot_losses: 0,
            points: 0,
            goals_for: 0,
            goals_against: 0,
            momentum: 0,
            recent: VecDeque::new(),
        }
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    /// Current run of wins or losses, e.g. "W3"; extra-time results count
    /// with their regulation counterpart
    pub fn streak(&self) -> Option<String> {
        let last = self.recent.back()?;
        let len = self
            .recent
            .iter()
            .rev()
            .take_while(|m| m.is_win() == last.is_win())
            .count();
        let prefix = if last.is_win() { "W" } else { "L" };
        Some(format!("{}{}", prefix, len))
    }

    /// Fold one game into the row
    pub fn record(&mut self, result: &MatchResult, side: Side, recent_len: usize) {
        let mark = ResultMark::of(result, side);
        self.games += 1;
        self.points += result.points(side);
        self.goals_for += result.final_score.goals(side);
        self.goals_against += result.final_score.goals(side.opponent());
        match mark {
            ResultMark::W | ResultMark::OTW => {
                self.wins += 1;
                self.momentum += 1;
            }
            ResultMark::L => self.losses += 1,
            ResultMark::OTL => self.ot_losses += 1,
        }
        if !mark.is_win() {
            self.momentum = self.momentum.saturating_sub(1);
        }
        self.recent.push_back(mark);
        while self.recent.len() > recent_len {
            self.recent.pop_front();
        }
    }
}

/// Standings table of one conference, kept in schedule order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub conference: Conference,
    pub rows: Vec<Standing>,
}

impl Standings {
    pub fn new(conference: Conference, teams: &[String]) -> Self {
        Self {
            conference,
            rows: teams.iter().map(|t| Standing::new(t.clone(), conference)).collect(),
        }
    }

    pub fn get(&self, team: &str) -> Option<&Standing> {
        self.rows.iter().find(|r| r.name == team)
    }

    fn get_mut(&mut self, team: &str) -> Result<&mut Standing> {
        self.rows
            .iter_mut()
            .find(|r| r.name == team)
            .ok_or_else(|| LeagueError::UnknownTeam(team.to_string()))
    }

    pub fn momentum(&self, team: &str) -> u32 {
        self.get(team).map_or(0, |r| r.momentum)
    }

    /// Apply a finished game to both participants
    pub fn apply(&mut self, result: &MatchResult, recent_len: usize) -> Result<()> {
        // Both teams must exist before either row changes
        self.get_mut(&result.away)?;
        self.get_mut(&result.home)?.record(result, Side::Home, recent_len);
        self.get_mut(&result.away)?.record(result, Side::Away, recent_len);
        Ok(())
    }

    /// Rows ranked by points, then goals for, then goal difference
    pub fn ranked(&self) -> Vec<&Standing> {
        let mut rows: Vec<&Standing> = self.rows.iter().collect();
        rows.sort_by_key(|r| {
            (
                Reverse(r.points),
                Reverse(r.goals_for),
                Reverse(r.goal_difference()),
                r.name.clone(),
            )
        });
        rows
    }

    pub fn total_points(&self) -> u32 {
        self.rows.iter().map(|r| r.points).sum()
    }
}
