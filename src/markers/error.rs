// Marker scheduler error types.

use std::path::PathBuf;

use thiserror::Error;

/// Broken scheduling contracts. These mean a bug upstream of the call that
/// raised them, never a runtime condition to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("cannot evict: spawn window is empty")]
    EvictFromEmptyWindow,

    #[error("cannot advance cursor before any marker group was spawned")]
    CursorAdvanceBeforeSpawn,

    #[error("cursor {cursor} is out of range for {len} candidates")]
    CursorOutOfRange { cursor: usize, len: usize },

    #[error("candidate {0} already holds an active marker group")]
    DuplicateCandidate(usize),

    #[error("spawn window is already at capacity ({capacity})")]
    WindowOverflow { capacity: usize },

    #[error("spawn requested while no session is running")]
    NoSession,
}

/// Errors that can occur during scheduling operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors raised while loading or validating a [`SpawnerConfig`](super::SpawnerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Turn classification failures. Recovered by the scheduler: the marker
/// group still spawns, only its hazard is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("index {index} is out of range for {len} candidates")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("non-finite candidate position around index {0}")]
    NonFinite(usize),
}
