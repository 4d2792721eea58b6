//! Leg-proximity (collision) check.
//!
//! Legs are modelled as straight segments from base anchor to platform
//! joint. Two legs collide when their segments come closer than the
//! configured distance. Legs that meet at a shared platform joint touch by
//! construction and are not compared.

use nalgebra::{Point3, Vector3};

use super::{LegSegment, leg_segments};

const EPSILON: f64 = 1e-12;

/// Two legs closer than the collision distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegCollision {
    /// Lower leg index.
    pub first: usize,
    /// Higher leg index.
    pub second: usize,
    /// Closest distance between the two leg segments.
    pub distance: f64,
}

/// Closest points between segments `[start_a, end_a]` and `[start_b, end_b]`.
///
/// Returns `(point_on_a, point_on_b)`.
#[allow(clippy::many_single_char_names, clippy::suspicious_operation_groupings)]
#[must_use]
pub fn closest_points_on_segments(
    start_a: &Point3<f64>,
    end_a: &Point3<f64>,
    start_b: &Point3<f64>,
    end_b: &Point3<f64>,
) -> (Point3<f64>, Point3<f64>) {
    let dir_a: Vector3<f64> = end_a - start_a;
    let dir_b: Vector3<f64> = end_b - start_b;
    let r = start_a - start_b;
    let a = dir_a.dot(&dir_a);
    let e = dir_b.dot(&dir_b);
    let f = dir_b.dot(&r);

    if a < EPSILON && e < EPSILON {
        return (*start_a, *start_b);
    }

    let (s, t);
    if a < EPSILON {
        // A is a point
        s = 0.0;
        t = (f / e).clamp(0.0, 1.0);
    } else {
        let c = dir_a.dot(&r);
        if e < EPSILON {
            // B is a point
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else {
            let b = dir_a.dot(&dir_b);
            let denom = a * e - b * b;

            // Parallel segments: start from s = 0 and let the clamps below fix it up.
            s = if denom.abs() > EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let t_num = b * s + f;
            if t_num < 0.0 {
                let s_new = (-c / a).clamp(0.0, 1.0);
                return (*start_a + dir_a * s_new, *start_b);
            }
            if t_num > e {
                let s_new = ((b - c) / a).clamp(0.0, 1.0);
                return (*start_a + dir_a * s_new, *end_b);
            }
            t = t_num / e;
        }
    }

    (*start_a + dir_a * s, *start_b + dir_b * t)
}

/// Minimum distance between two segments.
///
/// # Example
///
/// ```
/// use platform_kinematics::segment_distance;
/// use platform_types::Point3;
///
/// // Two skew segments crossing 10 mm apart.
/// let d = segment_distance(
///     &Point3::new(-50.0, 0.0, 0.0),
///     &Point3::new(50.0, 0.0, 0.0),
///     &Point3::new(0.0, -50.0, 10.0),
///     &Point3::new(0.0, 50.0, 10.0),
/// );
/// assert!((d - 10.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn segment_distance(
    start_a: &Point3<f64>,
    end_a: &Point3<f64>,
    start_b: &Point3<f64>,
    end_b: &Point3<f64>,
) -> f64 {
    let (on_a, on_b) = closest_points_on_segments(start_a, end_a, start_b, end_b);
    (on_a - on_b).norm()
}

/// Reports every pair of legs whose segments are closer than `min_distance`.
///
/// Pairs attached to the same platform joint are skipped.
#[must_use]
pub fn check_leg_collisions(
    base_anchors: &[Point3<f64>],
    world_joints: &[Point3<f64>],
    leg_to_joint: &[usize],
    min_distance: f64,
) -> Vec<LegCollision> {
    let segments: Vec<LegSegment> =
        leg_segments(base_anchors, world_joints, leg_to_joint).collect();

    let mut collisions = Vec::new();
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            if a.joint == b.joint {
                continue;
            }
            let distance = segment_distance(&a.base, &a.top, &b.base, &b.top);
            if distance < min_distance {
                collisions.push(LegCollision {
                    first: a.leg,
                    second: b.leg,
                    distance,
                });
            }
        }
    }
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parallel_segments() {
        let d = segment_distance(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 100.0),
            &Point3::new(30.0, 0.0, 0.0),
            &Point3::new(30.0, 0.0, 100.0),
        );
        assert_relative_eq!(d, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_endpoint_closest() {
        // B sits past the end of A.
        let d = segment_distance(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(10.0, 0.0, 0.0),
            &Point3::new(13.0, 4.0, 0.0),
            &Point3::new(13.0, 40.0, 0.0),
        );
        assert_relative_eq!(d, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersecting_segments() {
        let d = segment_distance(
            &Point3::new(-1.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, -1.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(d, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_point_segments() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let q = Point3::new(4.0, 6.0, 3.0);
        assert_relative_eq!(segment_distance(&p, &p, &q, &q), 5.0, epsilon = 1e-12);
        let d = segment_distance(&p, &p, &Point3::new(0.0, 0.0, 0.0), &Point3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(d, 13.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_close_legs_collide() {
        let base = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(200.0, 0.0, 0.0),
        ];
        let joints = [
            Point3::new(0.0, 0.0, 150.0),
            Point3::new(10.0, 0.0, 150.0),
            Point3::new(200.0, 0.0, 150.0),
        ];
        let collisions = check_leg_collisions(&base, &joints, &[0, 1, 2], 20.0);
        assert_eq!(collisions.len(), 1);
        assert_eq!((collisions[0].first, collisions[0].second), (0, 1));
        assert_relative_eq!(collisions[0].distance, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shared_joint_not_compared() {
        let base = [Point3::new(-60.0, 0.0, 0.0), Point3::new(60.0, 0.0, 0.0)];
        let joints = [Point3::new(0.0, 0.0, 150.0)];
        assert!(check_leg_collisions(&base, &joints, &[0, 0], 20.0).is_empty());
    }
}
