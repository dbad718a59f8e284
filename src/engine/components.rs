// ECS components for spawned marker instances
// Freshly instantiated markers sit at the origin until the scheduler places them.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use crate::markers::PrefabKind;

/// World position of a marker instance
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Transform {
    pub position: Vec3,
}

/// World rotation of a marker instance (identity until placed)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Orientation {
    pub rotation: Quat,
}

/// Which prefab an entity was instantiated from
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: PrefabKind,
}
