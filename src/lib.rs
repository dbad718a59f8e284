// Path guide markers for a walked route.
// Keeps a bounded, sliding set of guide markers ahead of an observer moving
// along a recorded path, with hazard markers at sharp turns.

pub mod engine;
pub mod markers;

// Re-export commonly used items
pub use markers::{
    CandidateIndex, ConfigError, CurveOracle, HazardOutcome, InstanceFactory,
    InvariantViolation, MarkerGroup, MarkerScheduler, NotReady, PositionSource, PrefabKind,
    SchedulerError, SchedulerResult, SchedulerStats, SpawnWindow, SpawnerConfig, TickOutcome,
    TurnClassifier, TurnError, TurnInfo,
};
