//! Season progression: standings, player stats, persisted state, playoffs
//! and the state machine driving them

pub mod engine;
pub mod playoffs;
pub mod standings;
pub mod state;
pub mod stats;
pub mod store;

pub use engine::{Advance, MatchdaySummary, RoundSummary, SeasonEngine, SeasonStatus};
pub use standings::{ResultMark, Standing, Standings};
pub use state::{Phase, SeasonState};
pub use stats::PlayerStats;
pub use store::StateStore;
