use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Corrupt season state at {path:?}: {reason}")]
    CorruptState { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Team not found: {0}")]
    UnknownTeam(String),

    #[error("Game {home} vs {away} ended tied at {score} after tie-break")]
    UnresolvedTie {
        home: String,
        away: String,
        score: String,
    },

    #[error("Playoff seeding failed: {0}")]
    PlayoffSeeding(String),

    #[error("Invalid playoff state: {0}")]
    InvalidPlayoffState(String),
}

impl LeagueError {
    /// Errors that leave the persisted state untouched and can be retried
    /// after the caller fixes the environment.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LeagueError::IoError(_) | LeagueError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
