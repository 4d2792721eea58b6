//! Joint-angle (singularity proximity) check.

use nalgebra::Point3;

use super::{ValidationParams, leg_segments};
use crate::solver::angle_from_vertical_deg;

/// How close a leg is to the reachability boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AngleSeverity {
    /// Above the warning angle, still reachable.
    NearSingular,
    /// At or above the cutoff angle.
    Unreachable,
}

impl AngleSeverity {
    /// Returns `true` if this severity fails validation.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Unreachable)
    }
}

/// A leg tilted far from vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleWarning {
    /// Leg index.
    pub leg: usize,
    /// Angle from vertical, in degrees.
    pub angle_deg: f64,
    /// Warning or failure.
    pub severity: AngleSeverity,
}

/// Classifies a single leg angle, or `None` if it is below the warning angle.
#[must_use]
pub fn classify_angle(angle_deg: f64, params: &ValidationParams) -> Option<AngleSeverity> {
    if angle_deg >= params.angle_cutoff_deg || angle_deg.is_nan() {
        Some(AngleSeverity::Unreachable)
    } else if angle_deg > params.angle_warning_deg {
        Some(AngleSeverity::NearSingular)
    } else {
        None
    }
}

/// Measures every leg's angle from vertical and reports those past the
/// warning angle.
///
/// Legs whose joint index is outside `world_joints` are skipped.
#[must_use]
pub fn check_joint_angles(
    base_anchors: &[Point3<f64>],
    world_joints: &[Point3<f64>],
    leg_to_joint: &[usize],
    params: &ValidationParams,
) -> Vec<AngleWarning> {
    leg_segments(base_anchors, world_joints, leg_to_joint)
        .filter_map(|segment| {
            let angle_deg = angle_from_vertical_deg(&segment.vector());
            classify_angle(angle_deg, params).map(|severity| AngleWarning {
                leg: segment.leg,
                angle_deg,
                severity,
            })
        })
        .collect()
}
