//! Immutable record of a completed game

use serde::{Deserialize, Serialize};

use crate::core::error::{LeagueError, Result};
use crate::core::types::Side;

use super::replay::{Period, Replay};
use super::resolution::{Decision, ScoreLine};
use super::strength::StrengthPanel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home: String,
    pub away: String,
    pub regulation: ScoreLine,
    pub final_score: ScoreLine,
    pub decision: Decision,
    pub strength: StrengthPanel,
    pub replay: Replay,
}

impl MatchResult {
    /// Derive every score field from the replay log.
    ///
    /// Fails with `UnresolvedTie` if the log does not produce a winner.
    pub fn from_replay(replay: Replay, strength: StrengthPanel) -> Result<Self> {
        let regulation = replay.score(Some(Period::Regulation));
        let final_score = replay.score(None);
        if final_score.is_tied() {
            return Err(LeagueError::UnresolvedTie {
                home: replay.home.clone(),
                away: replay.away.clone(),
                score: final_score.to_string(),
            });
        }
        let decision = match replay.extra_period() {
            None => Decision::Regulation,
            Some(Period::Shootout) => Decision::Shootout,
            Some(_) => Decision::Overtime,
        };
        Ok(Self {
            home: replay.home.clone(),
            away: replay.away.clone(),
            regulation,
            final_score,
            decision,
            strength,
            replay,
        })
    }

    pub fn overtime(&self) -> bool {
        self.decision == Decision::Overtime
    }

    pub fn shootout(&self) -> bool {
        self.decision == Decision::Shootout
    }

    pub fn winner_side(&self) -> Side {
        if self.final_score.home > self.final_score.away {
            Side::Home
        } else {
            Side::Away
        }
    }

    pub fn winner(&self) -> &str {
        self.team(self.winner_side())
    }

    pub fn loser(&self) -> &str {
        self.team(self.winner_side().opponent())
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn side_of(&self, team: &str) -> Option<Side> {
        if team == self.home {
            Some(Side::Home)
        } else if team == self.away {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// League points from the terminal state: 3/0 in regulation, 2/1 after extra time
    pub fn points(&self, side: Side) -> u32 {
        let won = side == self.winner_side();
        match (self.decision.extra_time(), won) {
            (false, true) => 3,
            (false, false) => 0,
            (true, true) => 2,
            (true, false) => 1,
        }
    }

    /// Score string such as "3:2" or "3:2 OT"
    pub fn score_label(&self) -> String {
        match self.decision.suffix() {
            Some(suffix) => format!("{} {}", self.final_score, suffix),
            None => self.final_score.to_string(),
        }
    }
}
