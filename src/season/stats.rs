//! Cumulative player scoring, read from replay logs only

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;
use crate::game::replay::{Credit, Replay};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub name: String,
    pub team: String,
    pub goals: u32,
    pub assists: u32,
}

impl PlayerLine {
    pub fn points(&self) -> u32 {
        self.goals + self.assists
    }
}

/// Leaderboard category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Points,
    Goals,
    Assists,
}

impl Category {
    fn value(&self, line: &PlayerLine) -> u32 {
        match self {
            Category::Points => line.points(),
            Category::Goals => line.goals,
            Category::Assists => line.assists,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderEntry {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
}

/// Player table keyed by id; BTreeMap keeps the save file order stable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerStats {
    pub players: BTreeMap<PlayerId, PlayerLine>,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &PlayerId) -> Option<&PlayerLine> {
        self.players.get(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn line_mut(&mut self, credit: &Credit, team: &str) -> &mut PlayerLine {
        self.players
            .entry(credit.id.clone())
            .or_insert_with(|| PlayerLine {
                name: credit.name.clone(),
                team: team.to_string(),
                goals: 0,
                assists: 0,
            })
    }

    /// Credit every goal and assist in the replay
    pub fn record_replay(&mut self, replay: &Replay) {
        for event in replay.goals() {
            let Some(goal) = &event.goal else { continue };
            if let Some(scorer) = &goal.scorer {
                self.line_mut(scorer, &event.team).goals += 1;
            }
            if let Some(assist) = &goal.assist {
                self.line_mut(assist, &event.team).assists += 1;
            }
        }
    }

    pub fn total_goals(&self) -> u32 {
        self.players.values().map(|l| l.goals).sum()
    }

    /// Top `n` players in a category; ties break on goals, then name
    pub fn leaders(&self, category: Category, n: usize) -> Vec<LeaderEntry> {
        let mut lines: Vec<(&PlayerId, &PlayerLine)> = self
            .players
            .iter()
            .filter(|(_, l)| category.value(l) > 0)
            .collect();
        lines.sort_by_key(|(_, l)| (Reverse(category.value(l)), Reverse(l.goals), l.name.clone()));
        lines
            .into_iter()
            .take(n)
            .map(|(id, l)| LeaderEntry {
                id: id.clone(),
                name: l.name.clone(),
                team: l.team.clone(),
                goals: l.goals,
                assists: l.assists,
                points: l.points(),
            })
            .collect()
    }
}
