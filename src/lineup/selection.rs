//! Overall-weighted selection per position group

use std::cmp::Reverse;

use ahash::AHashSet;
use ordered_float::OrderedFloat;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::PositionGroup;
use crate::roster::{RosterPlayer, Team};

/// Draw a selection score: overall plus noise bounded by `jitter * overall`
pub fn selection_score(player: &RosterPlayer, jitter: f64, rng: &mut ChaCha8Rng) -> f64 {
    let overall = player.overall as f64;
    if jitter <= 0.0 {
        return overall;
    }
    overall + rng.gen_range(-jitter..=jitter) * overall
}

/// Roster identity used for deduplication
pub type DressKey<'a> = (&'a str, Option<u8>);

fn dress_key(player: &RosterPlayer) -> DressKey<'_> {
    (player.name.as_str(), player.number)
}

/// Pick the top `count` players of a position group by jittered overall.
///
/// Roster entries sharing a name and jersey number are taken once per
/// lineup: candidates already in `dressed` are skipped, and the picked
/// players are added to it.
pub fn pick<'a>(
    team: &'a Team,
    position: PositionGroup,
    count: usize,
    jitter: f64,
    dressed: &mut AHashSet<DressKey<'a>>,
    rng: &mut ChaCha8Rng,
) -> Vec<RosterPlayer> {
    let mut group = AHashSet::new();
    let mut scored: Vec<(f64, &RosterPlayer)> = team
        .players_at(position)
        .filter(|p| !dressed.contains(&dress_key(p)) && group.insert(dress_key(p)))
        .map(|p| (selection_score(p, jitter, rng), p))
        .collect();

    scored.sort_by_key(|(score, _)| Reverse(OrderedFloat(*score)));
    scored.truncate(count);
    scored
        .into_iter()
        .map(|(_, p)| {
            dressed.insert(dress_key(p));
            p.clone()
        })
        .collect()
}
