//! Artifact documents and the writer that lays them out on disk

pub mod artifacts;
pub mod snapshot;
pub mod writer;

pub use artifacts::{
    GameSummary, MatchdayArtifact, PlayoffRoundArtifact, ReplayArtifact, ReplayIndex,
    ReplayIndexEntry,
};
pub use snapshot::{build_snapshot, LeagueSnapshot};
pub use writer::ArtifactWriter;
