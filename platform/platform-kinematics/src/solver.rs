//! Closed-form inverse kinematics.
//!
//! For leg `i` the platform joint `legToJoint[i]` is moved into the base
//! frame, and the leg is the straight segment from base anchor `i` to that
//! joint. Its length is the actuator length; the difference from the nominal
//! length is the extension. The solve never fails for a finite pose:
//! whether the result is physically feasible is decided by validation.

use nalgebra::{Point3, Vector3};
use platform_types::{Configuration, Pose};

use crate::force::{ForceEstimate, estimate_force};
use crate::transform::PoseTransform;

/// Angle between `leg` and the +Z axis, in degrees.
///
/// Returns 0 for a zero-length vector.
///
/// # Example
///
/// ```
/// use platform_kinematics::angle_from_vertical_deg;
/// use platform_types::Vector3;
///
/// assert!(angle_from_vertical_deg(&Vector3::new(0.0, 0.0, 5.0)).abs() < 1e-12);
/// assert!((angle_from_vertical_deg(&Vector3::new(1.0, 0.0, 1.0)) - 45.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn angle_from_vertical_deg(leg: &Vector3<f64>) -> f64 {
    leg.x.hypot(leg.y).atan2(leg.z).to_degrees()
}

/// Solved state of one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegSolution {
    /// Base anchor of the leg, in the base frame.
    pub base_anchor: Point3<f64>,
    /// Platform joint of the leg, in the base frame.
    pub world_joint: Point3<f64>,
    /// Absolute leg length.
    pub length: f64,
    /// Nominal leg length.
    pub nominal: f64,
}

impl LegSolution {
    /// Vector from base anchor to joint.
    #[must_use]
    pub fn vector(&self) -> Vector3<f64> {
        self.world_joint - self.base_anchor
    }

    /// Signed deviation from the nominal length.
    #[must_use]
    pub fn extension(&self) -> f64 {
        self.length - self.nominal
    }

    /// Tilt of the leg away from vertical, in degrees.
    #[must_use]
    pub fn angle_from_vertical_deg(&self) -> f64 {
        angle_from_vertical_deg(&self.vector())
    }

    /// Full derived state for display.
    #[must_use]
    pub fn state(&self) -> LegState {
        LegState {
            world_joint: self.world_joint,
            length: self.length,
            extension: self.extension(),
            angle_from_vertical_deg: self.angle_from_vertical_deg(),
            force: estimate_force(self.length, self.nominal),
        }
    }
}

/// Everything a renderer needs to draw one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegState {
    /// Platform joint position in the base frame.
    pub world_joint: Point3<f64>,
    /// Absolute leg length.
    pub length: f64,
    /// Signed deviation from nominal.
    pub extension: f64,
    /// Tilt from vertical, in degrees.
    pub angle_from_vertical_deg: f64,
    /// Compressive-force proxy.
    pub force: ForceEstimate,
}

/// Result of solving one pose.
///
/// Leg order always matches the configuration's leg order.
#[derive(Debug, Clone, PartialEq)]
pub struct IkSolution {
    legs: Vec<LegSolution>,
    world_joints: Vec<Point3<f64>>,
}

impl IkSolution {
    /// Per-leg results.
    #[must_use]
    pub fn legs(&self) -> &[LegSolution] {
        &self.legs
    }

    /// All distinct platform joints in the base frame.
    #[must_use]
    pub fn world_joints(&self) -> &[Point3<f64>] {
        &self.world_joints
    }

    /// Absolute length of every leg.
    #[must_use]
    pub fn leg_lengths(&self) -> Vec<f64> {
        self.legs.iter().map(|leg| leg.length).collect()
    }

    /// Extension of every leg.
    #[must_use]
    pub fn extensions(&self) -> Vec<f64> {
        self.legs.iter().map(LegSolution::extension).collect()
    }

    /// Derived per-leg state.
    #[must_use]
    pub fn leg_states(&self) -> Vec<LegState> {
        self.legs.iter().map(LegSolution::state).collect()
    }

    /// Difference between the longest and shortest leg.
    #[must_use]
    pub fn stroke_range(&self) -> f64 {
        let (min, max) = self
            .legs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), leg| {
                (lo.min(leg.length), hi.max(leg.length))
            });
        if self.legs.is_empty() { 0.0 } else { max - min }
    }

    /// Length of the longest leg, or 0 when there are no legs.
    #[must_use]
    pub fn max_length(&self) -> f64 {
        self.legs.iter().map(|leg| leg.length).fold(0.0, f64::max)
    }
}

/// Solves inverse kinematics for `pose`.
///
/// # Example
///
/// ```
/// use platform_kinematics::solve;
/// use platform_types::{Configuration, GeometryParams, Pose, Topology};
///
/// let config = Configuration::new(Topology::SixThree, &GeometryParams::default()).unwrap();
/// let solution = solve(&config, &Pose::home());
///
/// let lengths = solution.leg_lengths();
/// assert_eq!(lengths.len(), 6);
/// assert!(lengths.iter().all(|&l| l > 0.0));
/// assert!((lengths[0] - lengths[1]).abs() < 1e-6);
/// ```
#[must_use]
pub fn solve(config: &Configuration, pose: &Pose) -> IkSolution {
    solve_with_transform(config, &PoseTransform::from_pose(pose))
}

/// Solves inverse kinematics with a prebuilt transform.
#[must_use]
pub fn solve_with_transform(config: &Configuration, transform: &PoseTransform) -> IkSolution {
    let anchors = config.anchors();
    let world_joints = transform.apply_all(anchors.joints());

    let legs = anchors
        .base()
        .iter()
        .zip(config.leg_to_joint())
        .zip(config.nominal_lengths())
        .map(|((base_anchor, &joint), &nominal)| {
            let world_joint = world_joints[joint];
            LegSolution {
                base_anchor: *base_anchor,
                world_joint,
                length: (world_joint - base_anchor).norm(),
                nominal,
            }
        })
        .collect();

    IkSolution { legs, world_joints }
}
