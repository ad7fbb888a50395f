//! Game-day lineups
//!
//! A lineup is a per-game copy of the selected roster players, each tagged
//! with the slot it fills. The source roster is never touched.

pub mod roles;
pub mod selection;

use ahash::AHashSet;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::LineupConfig;
use crate::core::types::PositionGroup;
use crate::roster::{RosterPlayer, Team};

/// Where a selected player is deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Forward line 1-4
    Line(u8),
    /// Defense pair 1-3
    Pair(u8),
    /// Starting goalie
    Goalie,
    /// Dressed but without a primary slot
    Rotation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupPlayer {
    pub player: RosterPlayer,
    pub slot: Slot,
}

impl LineupPlayer {
    /// Skaters with a line or pair take part in generated events
    pub fn on_ice(&self) -> bool {
        matches!(self.slot, Slot::Line(_) | Slot::Pair(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub team: String,
    pub forwards: Vec<LineupPlayer>,
    pub defenders: Vec<LineupPlayer>,
    pub goalies: Vec<LineupPlayer>,
}

impl Lineup {
    pub fn players(&self) -> impl Iterator<Item = &LineupPlayer> {
        self.forwards
            .iter()
            .chain(self.defenders.iter())
            .chain(self.goalies.iter())
    }

    /// Skaters eligible to score or assist
    pub fn skaters_on_ice(&self) -> impl Iterator<Item = &RosterPlayer> {
        self.forwards
            .iter()
            .chain(self.defenders.iter())
            .filter(|p| p.on_ice())
            .map(|p| &p.player)
    }

    pub fn goalie(&self) -> Option<&RosterPlayer> {
        self.goalies
            .iter()
            .find(|p| p.slot == Slot::Goalie)
            .map(|p| &p.player)
    }

    pub fn line(&self, number: u8) -> impl Iterator<Item = &RosterPlayer> {
        self.forwards
            .iter()
            .filter(move |p| p.slot == Slot::Line(number))
            .map(|p| &p.player)
    }

    pub fn pair(&self, number: u8) -> impl Iterator<Item = &RosterPlayer> {
        self.defenders
            .iter()
            .filter(move |p| p.slot == Slot::Pair(number))
            .map(|p| &p.player)
    }

    pub fn len(&self) -> usize {
        self.forwards.len() + self.defenders.len() + self.goalies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn average_overall(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.players().map(|p| p.player.overall as f64).sum::<f64>() / self.len() as f64
    }
}

/// Select a game-day lineup from the roster and assign lines and pairs.
///
/// Short position groups degrade the lineup instead of failing: missing
/// forwards leave line 4 thin, and a missing goalie only logs a warning.
pub fn build_lineup(team: &Team, config: &LineupConfig, rng: &mut ChaCha8Rng) -> Lineup {
    let mut dressed = AHashSet::new();
    let mut pick = |position, count, rng: &mut ChaCha8Rng| {
        selection::pick(team, position, count, config.jitter, &mut dressed, rng)
    };
    let forwards = pick(PositionGroup::Forward, config.forwards, rng);
    let defenders = pick(PositionGroup::Defense, config.defenders, rng);
    let goalies = pick(PositionGroup::Goalie, config.goalies, rng);

    if forwards.len() < config.forwards || defenders.len() < config.defenders {
        tracing::warn!(
            "{} dresses {} forwards and {} defenders (wanted {} and {})",
            team.name,
            forwards.len(),
            defenders.len(),
            config.forwards,
            config.defenders
        );
    }
    if goalies.is_empty() && config.goalies > 0 {
        tracing::warn!("{} has no goalie available", team.name);
    }

    Lineup {
        team: team.name.clone(),
        forwards: roles::assign_forward_lines(forwards),
        defenders: roles::assign_defense_pairs(defenders),
        goalies: roles::assign_goalies(goalies),
    }
}
