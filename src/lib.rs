//! Highspeed League - two-conference hockey season simulation
//!
//! Builds a double round-robin schedule per conference, plays one matchday
//! per call, folds results into persisted standings and runs a best-of-seven
//! playoff bracket to a champion before rolling over to the next season.

pub mod core;
pub mod game;
pub mod lineup;
pub mod output;
pub mod roster;
pub mod schedule;
pub mod season;

pub use crate::core::config::LeagueConfig;
pub use crate::core::error::{LeagueError, Result};
pub use crate::season::{Advance, SeasonEngine, SeasonStatus};
