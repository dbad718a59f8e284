// Local turn classification.
//
// Looks two candidates back and two forward from the queried index and
// measures the signed heading change on the horizontal plane, so elevation
// changes never count as turns. Y is up: +1 is a left turn, -1 a right turn.

use glam::Vec3;

use super::error::TurnError;

/// How many candidates either side of the queried index are sampled.
const LOOK_AROUND: usize = 2;

/// Cross products smaller than this are treated as straight.
const SIGN_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnInfo {
    pub is_sharp: bool,
    /// Unsigned heading change in degrees, `[0, 180]`.
    pub angle_degrees: f32,
    /// +1 left, -1 right, 0 straight (or an exact reversal).
    pub sign: i8,
}

impl TurnInfo {
    pub const STRAIGHT: Self = Self {
        is_sharp: false,
        angle_degrees: 0.0,
        sign: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnClassifier {
    threshold_deg: f32,
}

impl TurnClassifier {
    pub fn new(threshold_deg: f32) -> Self {
        Self { threshold_deg }
    }

    /// Classify the turn at `index`.
    ///
    /// Fewer than three candidates, or a degenerate neighbourhood (repeated
    /// points after flattening), classify as straight.
    pub fn classify(&self, candidates: &[Vec3], index: usize) -> Result<TurnInfo, TurnError> {
        let len = candidates.len();
        if index >= len {
            return Err(TurnError::IndexOutOfRange { index, len });
        }
        if len < 3 {
            return Ok(TurnInfo::STRAIGHT);
        }

        let prev = candidates[index.saturating_sub(LOOK_AROUND)];
        let cur = candidates[index];
        let next = candidates[(index + LOOK_AROUND).min(len - 1)];
        if !(prev.is_finite() && cur.is_finite() && next.is_finite()) {
            return Err(TurnError::NonFinite(index));
        }

        let a = flatten(cur - prev);
        let b = flatten(next - cur);
        if a.length_squared() == 0.0 || b.length_squared() == 0.0 {
            return Ok(TurnInfo::STRAIGHT);
        }
        let a = a.normalize();
        let b = b.normalize();

        let angle_degrees = a.dot(b).clamp(-1.0, 1.0).acos().to_degrees();
        let turn = a.cross(b).y;
        let sign = if turn > SIGN_EPSILON {
            1
        } else if turn < -SIGN_EPSILON {
            -1
        } else {
            0
        };

        Ok(TurnInfo {
            is_sharp: angle_degrees >= self.threshold_deg,
            angle_degrees,
            sign,
        })
    }
}

#[inline]
fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
