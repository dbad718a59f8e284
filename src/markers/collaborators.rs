// Seams to the systems the scheduler drives but does not own:
// the path curve, the observer's position and the object/scene system.

use glam::{Quat, Vec3};
use thiserror::Error;

/// Converts world positions to a normalised curve parameter.
///
/// Must be stable for a fixed curve across repeated calls in one session.
pub trait CurveOracle {
    /// Curve parameter `t ∈ [0, 1]` of the point on the path closest to `point`.
    fn world_to_parameter(&self, point: Vec3) -> f32;

    /// Total path length in world units.
    fn path_length(&self) -> f32;

    /// Distance between two points measured along the path.
    fn arc_distance(&self, a: Vec3, b: Vec3) -> f32 {
        (self.world_to_parameter(a) - self.world_to_parameter(b)).abs() * self.path_length()
    }
}

/// The observer's ground position has not been established yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("observer ground position is not available yet")]
pub struct NotReady;

/// Source of the observer's current ground position.
pub trait PositionSource {
    fn current_ground_position(&self) -> Result<Vec3, NotReady>;
}

/// Kinds of object the scheduler asks the factory for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefabKind {
    /// One of the pair of side guides placed at every candidate.
    Guide,
    /// Warning marker placed at sharp turns.
    Hazard,
}

/// Creates, positions and destroys visual instances.
///
/// Calls are synchronous and never fail for [`PrefabKind::Guide`].
/// Hazards are optional: a factory that does not provide them simply
/// means no hazard markers are placed.
pub trait InstanceFactory {
    type Handle;

    fn provides(&self, kind: PrefabKind) -> bool {
        kind == PrefabKind::Guide
    }

    fn instantiate(&mut self, kind: PrefabKind) -> Self::Handle;
    fn set_position(&mut self, handle: &Self::Handle, position: Vec3);
    fn set_orientation(&mut self, handle: &Self::Handle, rotation: Quat);
    fn destroy(&mut self, handle: Self::Handle);
}
