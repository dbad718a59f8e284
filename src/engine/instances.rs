// Instance factory backed by an ECS world.
// Each marker instance is an entity; destroying it despawns the entity.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use log::warn;

use super::components::{Marker, Orientation, Transform};
use crate::markers::{InstanceFactory, PrefabKind};

pub struct EcsInstanceFactory {
    world: World,
    /// Whether a hazard prefab is configured.
    hazards: bool,
}

impl EcsInstanceFactory {
    pub fn new(hazards: bool) -> Self {
        Self {
            world: World::new(),
            hazards,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl InstanceFactory for EcsInstanceFactory {
    type Handle = Entity;

    fn provides(&self, kind: PrefabKind) -> bool {
        match kind {
            PrefabKind::Guide => true,
            PrefabKind::Hazard => self.hazards,
        }
    }

    fn instantiate(&mut self, kind: PrefabKind) -> Entity {
        self.world
            .spawn((Transform::default(), Orientation::default(), Marker { kind }))
            .id()
    }

    fn set_position(&mut self, handle: &Entity, position: Vec3) {
        if let Some(mut transform) = self.world.get_mut::<Transform>(*handle) {
            transform.position = position;
        }
    }

    fn set_orientation(&mut self, handle: &Entity, rotation: Quat) {
        if let Some(mut orientation) = self.world.get_mut::<Orientation>(*handle) {
            orientation.rotation = rotation;
        }
    }

    fn destroy(&mut self, handle: Entity) {
        if !self.world.despawn(handle) {
            warn!("marker entity {handle:?} was already despawned");
        }
    }
}
