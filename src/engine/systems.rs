// Per-frame helpers for driving the demo world:
// moving the observer along the path and counting live marker entities.

use bevy_ecs::prelude::*;
use glam::Vec3;

use super::components::Marker;
use super::curve::PolylineCurve;
use crate::markers::{CurveOracle, PrefabKind};

/// Moves a point along a path at constant speed.
#[derive(Debug, Clone, Copy)]
pub struct PathWalker {
    /// Distance travelled along the path.
    pub distance: f32,
    /// World units per second
    pub speed: f32,
}

impl PathWalker {
    pub fn new(speed: f32) -> Self {
        Self {
            distance: 0.0,
            speed,
        }
    }

    /// Advance by `speed * dt` and return the new position on the path.
    pub fn advance(&mut self, path: &PolylineCurve, dt: f32) -> Vec3 {
        self.distance = (self.distance + self.speed * dt).min(path.path_length());
        path.point_at(self.distance)
    }

    pub fn finished(&self, path: &PolylineCurve) -> bool {
        self.distance >= path.path_length()
    }
}

/// Live marker entities by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCensus {
    pub guides: usize,
    pub hazards: usize,
}

/// Count marker entities in the world.
pub fn marker_census(world: &mut World) -> MarkerCensus {
    let mut census = MarkerCensus::default();
    let mut query = world.query::<&Marker>();
    for marker in query.iter(world) {
        match marker.kind {
            PrefabKind::Guide => census.guides += 1,
            PrefabKind::Hazard => census.hazards += 1,
        }
    }
    census
}
