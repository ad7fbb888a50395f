//! Shared league fixtures for integration tests

#![allow(dead_code)]

use std::path::Path;

use highspeed_league::core::types::{PlayerId, PositionGroup};
use highspeed_league::roster::{League, RosterPlayer, Team};
use highspeed_league::{LeagueConfig, SeasonEngine};

pub fn team(name: &str, top: u32) -> Team {
    let mut players = Vec::new();
    let groups = [
        (PositionGroup::Forward, 13),
        (PositionGroup::Defense, 8),
        (PositionGroup::Goalie, 2),
    ];
    let mut number = 1u8;
    for (position, count) in groups {
        for i in 0..count {
            let overall = top.saturating_sub(i * 2).max(40);
            players.push(RosterPlayer {
                id: PlayerId::new(format!("{}-{}{}", name, position.short(), i)),
                name: format!("{} {}{}", name, position.short(), i),
                number: Some(number),
                position,
                offense: overall,
                defense: overall.saturating_sub(4),
                speed: overall.saturating_sub(2),
                chemistry: 65,
                overall,
            });
            number += 1;
        }
    }
    Team {
        name: name.to_string(),
        players,
    }
}

pub fn league(per_conference: usize) -> League {
    League {
        north: (0..per_conference)
            .map(|i| team(&format!("North {}", i), 82 - i as u32 * 2))
            .collect(),
        south: (0..per_conference)
            .map(|i| team(&format!("South {}", i), 82 - i as u32 * 2))
            .collect(),
    }
}

pub fn config(root: &Path) -> LeagueConfig {
    LeagueConfig {
        data_root: root.to_path_buf(),
        ..LeagueConfig::default()
    }
}

pub fn engine(root: &Path, per_conference: usize) -> SeasonEngine {
    SeasonEngine::with_league(config(root), league(per_conference)).unwrap()
}
