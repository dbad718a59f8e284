// Windowed marker scheduling along a path.
//
// Leaf to root:
//   collaborators - curve oracle / observer position / instance factory seams
//   candidates    - trimmed, immutable candidate positions
//   turn          - local curvature classification
//   window        - bounded FIFO of live marker groups
//   placement     - orientation frame and guide/hazard poses
//   scheduler     - per-frame admission / eviction loop

pub mod candidates;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod placement;
pub mod scheduler;
pub mod turn;
pub mod window;

pub use candidates::CandidateIndex;
pub use collaborators::{CurveOracle, InstanceFactory, NotReady, PositionSource, PrefabKind};
pub use config::SpawnerConfig;
pub use error::{ConfigError, InvariantViolation, SchedulerError, SchedulerResult, TurnError};
pub use scheduler::{HazardOutcome, MarkerScheduler, SchedulerStats, TickOutcome};
pub use turn::{TurnClassifier, TurnInfo};
pub use window::{MarkerGroup, SpawnWindow};

#[cfg(test)]
pub(crate) mod testing;
