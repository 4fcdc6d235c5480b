//! Point math shared by the gesture recognizers.
//!
//! Points are plain `kurbo::Point` values; translations are `kurbo::Vec2`.
//! This module adds the handful of set and angle operations kurbo does not
//! provide.

use kurbo::Point;
use std::f64::consts::PI;

/// Extension methods for `kurbo::Point` used by the recognizers.
pub trait PointExt {
    /// Angle in radians from `self` to `other`, measured from the positive x axis.
    fn angle_to(&self, other: Point) -> f64;

    /// Mean distance from `self` to each point in `points`. Zero for an empty set.
    fn average_distance_to(&self, points: &[Point]) -> f64;
}

impl PointExt for Point {
    fn angle_to(&self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    fn average_distance_to(&self, points: &[Point]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }
        let total: f64 = points.iter().map(|p| self.distance(*p)).sum();
        total / points.len() as f64
    }
}

/// Arithmetic mean of a point set, or `None` if the set is empty.
pub fn midpoint(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Difference `a - b` between two angles, normalized into `(-π, π]`.
///
/// Keeps a step across the ±π seam from reading as a near full turn.
pub fn angular_minus(a: f64, b: f64) -> f64 {
    let mut diff = (a - b) % (2.0 * PI);
    if diff <= -PI {
        diff += 2.0 * PI;
    } else if diff > PI {
        diff -= 2.0 * PI;
    }
    diff
}
