//! Line and pair assignment for selected players

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::roster::RosterPlayer;

use super::{LineupPlayer, Slot};

const FORWARDS_PER_LINE: usize = 3;
const SCORING_LINES: usize = 2;
const DEFENSE_PAIRS: usize = 3;

fn sort_desc(players: &mut [RosterPlayer], score: fn(&RosterPlayer) -> f64) {
    players.sort_by_key(|p| Reverse(OrderedFloat(score(p))));
}

/// Top six by scoring composite fill lines 1-2, the rest by checking
/// composite fill line 3 and then line 4. Surplus forwards stay on line 4.
pub fn assign_forward_lines(mut forwards: Vec<RosterPlayer>) -> Vec<LineupPlayer> {
    sort_desc(&mut forwards, RosterPlayer::scoring_score);
    let split = forwards.len().min(FORWARDS_PER_LINE * SCORING_LINES);
    let mut checkers = forwards.split_off(split);
    sort_desc(&mut checkers, RosterPlayer::checking_score);

    let top = forwards.into_iter().enumerate().map(|(i, player)| LineupPlayer {
        player,
        slot: Slot::Line((i / FORWARDS_PER_LINE) as u8 + 1),
    });
    let bottom = checkers.into_iter().enumerate().map(|(i, player)| LineupPlayer {
        player,
        slot: Slot::Line(if i < FORWARDS_PER_LINE { 3 } else { 4 }),
    });
    top.chain(bottom).collect()
}

/// Three pairs by pairing composite; anyone beyond them rotates
pub fn assign_defense_pairs(mut defenders: Vec<RosterPlayer>) -> Vec<LineupPlayer> {
    sort_desc(&mut defenders, RosterPlayer::pairing_score);
    defenders
        .into_iter()
        .enumerate()
        .map(|(i, player)| LineupPlayer {
            player,
            slot: if i < DEFENSE_PAIRS * 2 {
                Slot::Pair((i / 2) as u8 + 1)
            } else {
                Slot::Rotation
            },
        })
        .collect()
}

/// First selected goalie starts, backups rotate
pub fn assign_goalies(goalies: Vec<RosterPlayer>) -> Vec<LineupPlayer> {
    goalies
        .into_iter()
        .enumerate()
        .map(|(i, player)| LineupPlayer {
            player,
            slot: if i == 0 { Slot::Goalie } else { Slot::Rotation },
        })
        .collect()
}
