// Test doubles for the scheduler's collaborators.

use std::collections::HashMap;

use glam::{Quat, Vec3};

use super::collaborators::{CurveOracle, InstanceFactory, NotReady, PositionSource, PrefabKind};

/// Factory that hands out integer handles and remembers what it was told.
pub struct RecordingFactory {
    hazards: bool,
    next: u32,
    pub kinds: HashMap<u32, PrefabKind>,
    pub positions: HashMap<u32, Vec3>,
    pub rotations: HashMap<u32, Quat>,
    pub destroyed: Vec<u32>,
}

impl RecordingFactory {
    pub fn new(hazards: bool) -> Self {
        Self {
            hazards,
            next: 0,
            kinds: HashMap::new(),
            positions: HashMap::new(),
            rotations: HashMap::new(),
            destroyed: Vec::new(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn live_of(&self, kind: PrefabKind) -> usize {
        self.kinds.values().filter(|k| **k == kind).count()
    }
}

impl InstanceFactory for RecordingFactory {
    type Handle = u32;

    fn provides(&self, kind: PrefabKind) -> bool {
        match kind {
            PrefabKind::Guide => true,
            PrefabKind::Hazard => self.hazards,
        }
    }

    fn instantiate(&mut self, kind: PrefabKind) -> u32 {
        let handle = self.next;
        self.next += 1;
        self.kinds.insert(handle, kind);
        handle
    }

    fn set_position(&mut self, handle: &u32, position: Vec3) {
        self.positions.insert(*handle, position);
    }

    fn set_orientation(&mut self, handle: &u32, rotation: Quat) {
        self.rotations.insert(*handle, rotation);
    }

    fn destroy(&mut self, handle: u32) {
        assert!(self.kinds.remove(&handle).is_some(), "double destroy of {handle}");
        self.destroyed.push(handle);
    }
}

/// Straight path along +Z from z = 0 to z = `length`; the parameter is
/// simply `z / length`.
pub struct AxisCurve {
    pub length: f32,
}

impl CurveOracle for AxisCurve {
    fn world_to_parameter(&self, point: Vec3) -> f32 {
        (point.z / self.length).clamp(0.0, 1.0)
    }

    fn path_length(&self) -> f32 {
        self.length
    }
}

/// Position source with a settable position; `None` means not ready.
#[derive(Default)]
pub struct FixedSource(pub Option<Vec3>);

impl PositionSource for FixedSource {
    fn current_ground_position(&self) -> Result<Vec3, NotReady> {
        self.0.ok_or(NotReady)
    }
}

/// `n` candidates along +Z spaced `step` apart.
pub fn straight_candidates(n: usize, step: f32) -> Vec<Vec3> {
    (0..n).map(|i| Vec3::new(0.0, 0.0, i as f32 * step)).collect()
}
