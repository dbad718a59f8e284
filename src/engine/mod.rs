// Engine module - concrete collaborators for the marker scheduler:
// a polyline path, a camera-derived ground position, and ECS-backed instances.

pub mod components;
pub mod curve;
pub mod ground;
pub mod instances;
pub mod systems;

// Re-export commonly used items
pub use components::*;
pub use curve::PolylineCurve;
pub use ground::CameraGroundSource;
pub use instances::EcsInstanceFactory;
pub use systems::{MarkerCensus, PathWalker, marker_census};
