// Marker placement geometry.
//
// Frame convention matches glam: local -Z is forward, +Y up, +X right.

use glam::{Mat3, Quat, Vec3};

/// Orientation frame at a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    /// Rotation taking local axes onto (right, up, -forward).
    pub rotation: Quat,
}

impl Frame {
    /// Build a frame looking along `forward` with world-up projected onto the
    /// plane orthogonal to it. Degenerate inputs fall back to -Z / any
    /// orthonormal up.
    pub fn look(forward: Vec3) -> Self {
        let forward = match forward.try_normalize() {
            Some(f) => f,
            None => Vec3::NEG_Z,
        };
        let up = (Vec3::Y - forward * Vec3::Y.dot(forward))
            .try_normalize()
            .unwrap_or_else(|| forward.any_orthonormal_vector());
        let right = forward.cross(up);
        let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
        Self {
            forward,
            up,
            right,
            rotation,
        }
    }
}

/// World position and rotation for one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Path heading at candidate `index`: towards the next candidate, or from
/// the previous one at the last index.
pub fn heading_at(candidates: &[Vec3], index: usize) -> Vec3 {
    if index + 1 < candidates.len() {
        candidates[index + 1] - candidates[index]
    } else if index > 0 && index < candidates.len() {
        candidates[index] - candidates[index - 1]
    } else {
        Vec3::ZERO
    }
}

/// Right and left guide poses, mirrored across the path and each rolled
/// `tilt` radians outward about the forward axis.
pub fn guide_poses(anchor: Vec3, frame: &Frame, radius: f32, height: f32, tilt: f32) -> [Pose; 2] {
    let lift = frame.up * height;
    let right = Pose {
        position: anchor + frame.right * radius + lift,
        rotation: Quat::from_axis_angle(frame.forward, tilt) * frame.rotation,
    };
    let left = Pose {
        position: anchor - frame.right * radius + lift,
        rotation: Quat::from_axis_angle(frame.forward, -tilt) * frame.rotation,
    };
    [right, left]
}

/// Side multiplier for a hazard: opposite to the turn. A sharp turn with
/// no measurable side (an exact reversal) uses +1.
#[inline]
pub fn hazard_side(turn_sign: i8) -> f32 {
    if turn_sign == 0 { 1.0 } else { -f32::from(turn_sign) }
}

/// Hazard pose offset along the forward axis to the side opposite the turn.
pub fn hazard_pose(anchor: Vec3, frame: &Frame, ahead: f32, height: f32, turn_sign: i8) -> Pose {
    Pose {
        position: anchor + frame.forward * (ahead * hazard_side(turn_sign)) + frame.up * height,
        rotation: frame.rotation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_3;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-4)
    }

    #[test]
    fn frame_is_orthonormal_and_rotation_matches_axes() {
        let frame = Frame::look(Vec3::new(1.0, 0.3, -2.0));
        assert!(frame.forward.is_normalized());
        assert!(frame.up.is_normalized());
        assert!(frame.forward.dot(frame.up).abs() < 1e-5);
        assert!(close(frame.rotation * Vec3::NEG_Z, frame.forward));
        assert!(close(frame.rotation * Vec3::Y, frame.up));
        assert!(close(frame.rotation * Vec3::X, frame.right));
    }

    #[test]
    fn level_forward_keeps_world_up() {
        let frame = Frame::look(Vec3::new(0.0, 0.0, -5.0));
        assert!(close(frame.up, Vec3::Y));
        assert!(close(frame.right, Vec3::X));
    }

    #[test]
    fn degenerate_forward_falls_back() {
        let frame = Frame::look(Vec3::ZERO);
        assert!(close(frame.forward, Vec3::NEG_Z));

        let vertical = Frame::look(Vec3::Y);
        assert!(vertical.up.is_normalized());
        assert!(vertical.up.dot(Vec3::Y).abs() < 1e-5);
    }

    #[test]
    fn heading_uses_previous_pair_at_last_index() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, -1.0)];
        assert_eq!(heading_at(&pts, 0), Vec3::X);
        assert_eq!(heading_at(&pts, 2), Vec3::NEG_Z);
        assert_eq!(heading_at(&pts[..1], 0), Vec3::ZERO);
    }

    #[test]
    fn guides_are_mirrored_across_the_path() {
        let frame = Frame::look(Vec3::NEG_Z);
        let anchor = Vec3::new(5.0, 0.0, 5.0);
        let [right, left] = guide_poses(anchor, &frame, 120.0, 45.0, FRAC_PI_3);

        assert!(close(right.position, Vec3::new(125.0, 45.0, 5.0)));
        assert!(close(left.position, Vec3::new(-115.0, 45.0, 5.0)));
        // Mirrored roll: the two guides' up vectors lean in opposite x directions.
        let right_up = right.rotation * Vec3::Y;
        let left_up = left.rotation * Vec3::Y;
        assert!((right_up.x + left_up.x).abs() < 1e-5);
        assert!((right_up.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn hazard_goes_opposite_to_the_turn() {
        let frame = Frame::look(Vec3::NEG_Z);
        let left_turn = hazard_pose(Vec3::ZERO, &frame, 300.0, 45.0, 1);
        assert!(close(left_turn.position, Vec3::new(0.0, 45.0, 300.0)));

        let right_turn = hazard_pose(Vec3::ZERO, &frame, 300.0, 45.0, -1);
        assert!(close(right_turn.position, Vec3::new(0.0, 45.0, -300.0)));

        assert_eq!(hazard_side(0), 1.0);
    }
}
