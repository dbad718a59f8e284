// Candidate spawn positions.
//
// Built once per session from the recorded path and never mutated after;
// a restart replaces the whole index. The ends are trimmed because the
// forward direction is poorly defined there and the start/finish objects
// already occupy that space.

use glam::Vec3;

/// Ordered, immutable candidate positions in path traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateIndex {
    positions: Box<[Vec3]>,
}

impl CandidateIndex {
    /// Take ownership of the recorded path and trim `margin` positions from
    /// each end.
    pub fn from_raw(raw: Vec<Vec3>, margin: usize) -> Self {
        Self {
            positions: trim_ends(raw, margin).into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Index after `index`, wrapping to 0 at the end.
    #[inline]
    pub fn wrapping_next(&self, index: usize) -> usize {
        if index + 1 >= self.positions.len() { 0 } else { index + 1 }
    }
}

/// Drop `margin` leading and trailing positions, but only when at least one
/// position survives; shorter inputs come back unchanged.
pub fn trim_ends(mut raw: Vec<Vec3>, margin: usize) -> Vec<Vec3> {
    if margin == 0 || raw.len() < 2 * margin + 1 {
        return raw;
    }
    raw.truncate(raw.len() - margin);
    raw.drain(..margin);
    raw
}
