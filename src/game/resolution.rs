//! Regulation goal draws and tie-break
//!
//! Goals per side are independent normal draws centred on the side's win
//! probability times the goal scale. The spread grows as the game gets
//! closer to a coin flip. A tied regulation score is settled by one extra
//! goal, in overtime or in a shootout.

use std::fmt;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::error::{LeagueError, Result};
use crate::core::types::Side;

/// How a game was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Regulation,
    Overtime,
    Shootout,
}

impl Decision {
    pub fn extra_time(&self) -> bool {
        !matches!(self, Decision::Regulation)
    }

    /// Suffix used in score strings, e.g. "3:2 OT"
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Decision::Regulation => None,
            Decision::Overtime => Some("OT"),
            Decision::Shootout => Some("SO"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreLine {
    pub home: u32,
    pub away: u32,
}

impl ScoreLine {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn goals(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn is_tied(&self) -> bool {
        self.home == self.away
    }

    pub fn leader(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn total(&self) -> u32 {
        self.home + self.away
    }

    pub fn margin(&self) -> u32 {
        self.home.abs_diff(self.away)
    }

    pub fn add_goal(&mut self, side: Side) {
        match side {
            Side::Home => self.home += 1,
            Side::Away => self.away += 1,
        }
    }
}

impl fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

/// Scoreline before the replay is synthesised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedScore {
    pub regulation: ScoreLine,
    pub decision: Decision,
    /// Side credited with the overtime or shootout goal
    pub extra_goal: Option<Side>,
}

/// Standard deviation of a regulation draw at home win probability `p`
pub fn regulation_sd(p: f64, config: &EngineConfig) -> f64 {
    let evenness = 1.0 - (2.0 * p - 1.0).abs();
    config.base_goal_sd + config.even_match_sd_bonus * evenness
}

fn draw_goals(mean: f64, sd: f64, rng: &mut ChaCha8Rng) -> Result<u32> {
    let normal = Normal::new(mean, sd)
        .map_err(|e| LeagueError::Config(format!("goal distribution ({mean}, {sd}): {e}")))?;
    Ok(normal.sample(rng).max(0.0).floor() as u32)
}

pub fn draw_regulation(p: f64, config: &EngineConfig, rng: &mut ChaCha8Rng) -> Result<ScoreLine> {
    let sd = regulation_sd(p, config);
    let home = draw_goals(p * config.goal_scale, sd, rng)?;
    let away = draw_goals((1.0 - p) * config.goal_scale, sd, rng)?;
    Ok(ScoreLine::new(home, away))
}

/// Settle a tied regulation score with a single extra goal.
///
/// Overtime favours the stronger side by its full win probability; the
/// shootout pulls that probability toward 0.5 by `shootout_damping`.
pub fn break_tie(p: f64, config: &EngineConfig, rng: &mut ChaCha8Rng) -> (Decision, Side) {
    if rng.gen::<f64>() < config.overtime_goal_rate {
        let side = if rng.gen::<f64>() < p { Side::Home } else { Side::Away };
        return (Decision::Overtime, side);
    }
    let shootout_p = 0.5 + (p - 0.5) * config.shootout_damping;
    let side = if rng.gen::<f64>() < shootout_p {
        Side::Home
    } else {
        Side::Away
    };
    (Decision::Shootout, side)
}

/// Draw a regulation score and break any tie
pub fn resolve_score(p: f64, config: &EngineConfig, rng: &mut ChaCha8Rng) -> Result<ResolvedScore> {
    let regulation = draw_regulation(p, config, rng)?;
    if !regulation.is_tied() {
        return Ok(ResolvedScore {
            regulation,
            decision: Decision::Regulation,
            extra_goal: None,
        });
    }
    let (decision, side) = break_tie(p, config, rng);
    Ok(ResolvedScore {
        regulation,
        decision,
        extra_goal: Some(side),
    })
}
