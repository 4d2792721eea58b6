//! Minimum-spacing check between attachment points.

use nalgebra::Point3;

/// How distances between points are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpacingMode {
    /// Ignore `z`; used for base anchors.
    Planar,
    /// Full 3D distance; used for platform joints.
    Spatial,
}

impl SpacingMode {
    /// Distance between `a` and `b` under this mode.
    #[must_use]
    pub fn distance(self, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
        match self {
            Self::Planar => (a.x - b.x).hypot(a.y - b.y),
            Self::Spatial => (a - b).norm(),
        }
    }
}

/// Which point set a spacing violation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointSet {
    /// Platform joints in the base frame.
    PlatformJoints,
    /// Base anchors.
    BaseAnchors,
}

impl PointSet {
    /// Short description for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlatformJoints => "platform joints",
            Self::BaseAnchors => "base anchors",
        }
    }
}

/// Two points closer than the minimum spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingViolation {
    /// The point set containing the pair.
    pub set: PointSet,
    /// Lower index of the pair.
    pub first: usize,
    /// Higher index of the pair.
    pub second: usize,
    /// Measured distance.
    pub distance: f64,
}

/// Finds the first pair of points closer than `min_spacing`.
///
/// Pairs are scanned in `(i, j)` order with `i < j`; the first violating pair
/// is returned with its measured distance.
///
/// # Example
///
/// ```
/// use platform_kinematics::{check_spacing, PointSet, SpacingMode};
/// use platform_types::Point3;
///
/// let joints = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(5.0, 0.0, 0.0),
///     Point3::new(2.5, 4.33, 0.0),
/// ];
/// let violation = check_spacing(&joints, 20.0, SpacingMode::Spatial, PointSet::PlatformJoints).unwrap();
/// assert_eq!((violation.first, violation.second), (0, 1));
/// ```
#[must_use]
pub fn check_spacing(
    points: &[Point3<f64>],
    min_spacing: f64,
    mode: SpacingMode,
    set: PointSet,
) -> Option<SpacingViolation> {
    points.iter().enumerate().find_map(|(first, a)| {
        points
            .iter()
            .enumerate()
            .skip(first + 1)
            .find_map(|(second, b)| {
                let distance = mode.distance(a, b);
                (distance < min_spacing).then_some(SpacingViolation {
                    set,
                    first,
                    second,
                    distance,
                })
            })
    })
}
