// Observer ground position derived from the head-mounted camera.
//
// The camera's height above the floor is unknown until the floor has been
// picked once. Until then the source reports NotReady and the scheduler
// skips its ticks.

use glam::Vec3;

use crate::markers::{NotReady, PositionSource};

/// Extra drop below the picked floor height. The floor is usually picked
/// while looking down, which reads the camera lower than when walking.
pub const FLOOR_PICK_BIAS: f32 = 10.0;

#[derive(Debug, Clone, Default)]
pub struct CameraGroundSource {
    camera_position: Vec3,
    /// Vertical offset from camera to ground. `None` until the floor is set.
    floor_offset: Option<f32>,
}

impl CameraGroundSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame with the camera's world position.
    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera_position = position;
    }

    /// Record the floor under the current camera position. The camera's
    /// height above it becomes the observer's height for the session.
    pub fn set_floor_from_camera(&mut self, floor: Vec3) {
        let offset = (floor - self.camera_position).y - FLOOR_PICK_BIAS;
        self.floor_offset = Some(offset);
    }

    pub fn is_ready(&self) -> bool {
        self.floor_offset.is_some()
    }
}

impl PositionSource for CameraGroundSource {
    fn current_ground_position(&self) -> Result<Vec3, NotReady> {
        let offset = self.floor_offset.ok_or(NotReady)?;
        Ok(self.camera_position + Vec3::Y * offset)
    }
}
