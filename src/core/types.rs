//! Core type definitions used throughout the codebase

use std::fmt;
use std::hash::{Hash, Hasher};

use fxhash::FxHasher64;
use serde::{Deserialize, Serialize};

/// Stable identifier for a roster player
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two independent round-robin groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conference {
    North,
    South,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::North, Conference::South];

    pub fn label(&self) -> &'static str {
        match self {
            Conference::North => "North",
            Conference::South => "South",
        }
    }
}

/// Position group of a roster player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    #[serde(rename = "F", alias = "Forward")]
    Forward,
    #[serde(rename = "D", alias = "Defense")]
    Defense,
    #[serde(rename = "G", alias = "Goalie")]
    Goalie,
}

impl PositionGroup {
    pub fn short(&self) -> &'static str {
        match self {
            PositionGroup::Forward => "F",
            PositionGroup::Defense => "D",
            PositionGroup::Goalie => "G",
        }
    }
}

/// Home or away side of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Mix a base seed with the coordinates of one unit of work.
///
/// Uses the fixed-width 64-bit Fx hash, so the same inputs produce the same
/// seed across builds and on 32- and 64-bit targets.
pub fn mix_seed(base: u64, parts: &[u64]) -> u64 {
    let mut hasher = FxHasher64::default();
    base.hash(&mut hasher);
    for part in parts {
        part.hash(&mut hasher);
    }
    hasher.finish()
}

/// Deterministic value in `[0, 1)` keyed by a string and integer coordinates.
pub fn keyed_unit(key: &str, parts: &[u64]) -> f64 {
    let mut hasher = FxHasher64::default();
    key.hash(&mut hasher);
    for part in parts {
        part.hash(&mut hasher);
    }
    (hasher.finish() >> 11) as f64 / (1u64 << 53) as f64
}

/// Lowercase ASCII slug used for artifact file names and fuzzy team matching
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        let mapped = match c {
            'ä' | 'Ä' => Some("ae"),
            'ö' | 'Ö' => Some("oe"),
            'ü' | 'Ü' => Some("ue"),
            'ß' => Some("ss"),
            _ => None,
        };
        if let Some(m) = mapped {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push_str(m);
        } else if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
