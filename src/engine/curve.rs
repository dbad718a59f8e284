// Arc-length parameterised polyline.
//
// The path is the piecewise-linear curve through the recorded points.
// `world_to_parameter` projects onto the closest segment, so distances
// between points are measured along the path, not straight across a bend.

use glam::Vec3;

use crate::markers::CurveOracle;

// ============================================================================
// POLYLINE CURVE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineCurve {
    points: Vec<Vec3>,
    /// Arc length from the first point to each point. Same length as `points`.
    cumulative: Vec<f32>,
}

impl PolylineCurve {
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += p.distance(points[i - 1]);
            }
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    /// Arc length along the path of the point closest to `point`.
    pub fn arc_length_at(&self, point: Vec3) -> f32 {
        match self.points.len() {
            0 | 1 => return 0.0,
            _ => {}
        }

        let mut best_dist_sq = f32::INFINITY;
        let mut best_arc = 0.0;
        for (i, seg) in self.points.windows(2).enumerate() {
            let (a, b) = (seg[0], seg[1]);
            let d = b - a;
            let len_sq = d.length_squared();
            let f = if len_sq > 0.0 {
                ((point - a).dot(d) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let dist_sq = point.distance_squared(a + d * f);
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best_arc = self.cumulative[i] + f * (self.cumulative[i + 1] - self.cumulative[i]);
            }
        }
        best_arc
    }

    /// Point at arc length `distance`, clamped to the ends of the path.
    pub fn point_at(&self, distance: f32) -> Vec3 {
        let Some(&first) = self.points.first() else {
            return Vec3::ZERO;
        };
        if distance <= 0.0 {
            return first;
        }
        // First cumulative entry strictly past `distance`.
        let upper = self.cumulative.partition_point(|&c| c <= distance);
        if upper >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let lower = upper - 1;
        let seg_len = self.cumulative[upper] - self.cumulative[lower];
        let f = if seg_len > 0.0 {
            (distance - self.cumulative[lower]) / seg_len
        } else {
            0.0
        };
        self.points[lower].lerp(self.points[upper], f)
    }
}

impl CurveOracle for PolylineCurve {
    fn world_to_parameter(&self, point: Vec3) -> f32 {
        let length = self.path_length();
        if length > 0.0 {
            (self.arc_length_at(point) / length).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn path_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> PolylineCurve {
        PolylineCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -100.0),
            Vec3::new(-100.0, 0.0, -100.0),
        ])
    }

    #[test]
    fn length_is_sum_of_segments() {
        assert_eq!(l_shape().path_length(), 200.0);
    }

    #[test]
    fn distance_follows_the_bend() {
        let curve = l_shape();
        let start = Vec3::ZERO;
        let end = Vec3::new(-100.0, 0.0, -100.0);
        // Straight-line distance is ~141, along the path it is 200.
        assert!((curve.arc_distance(start, end) - 200.0).abs() < 1e-3);
    }

    #[test]
    fn off_path_points_project_onto_nearest_segment() {
        let curve = l_shape();
        let beside = Vec3::new(5.0, 3.0, -40.0);
        assert!((curve.arc_length_at(beside) - 40.0).abs() < 1e-3);
        assert!((curve.world_to_parameter(beside) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn point_at_walks_the_path() {
        let curve = l_shape();
        assert_eq!(curve.point_at(-5.0), Vec3::ZERO);
        assert!(curve.point_at(50.0).abs_diff_eq(Vec3::new(0.0, 0.0, -50.0), 1e-4));
        assert!(curve.point_at(150.0).abs_diff_eq(Vec3::new(-50.0, 0.0, -100.0), 1e-4));
        assert_eq!(curve.point_at(500.0), Vec3::new(-100.0, 0.0, -100.0));
    }

    #[test]
    fn degenerate_curves() {
        let empty = PolylineCurve::new(vec![]);
        assert_eq!(empty.path_length(), 0.0);
        assert_eq!(empty.world_to_parameter(Vec3::X), 0.0);
        assert_eq!(empty.point_at(1.0), Vec3::ZERO);

        let single = PolylineCurve::new(vec![Vec3::X]);
        assert_eq!(single.world_to_parameter(Vec3::Z), 0.0);
        assert_eq!(single.point_at(3.0), Vec3::X);
    }
}
