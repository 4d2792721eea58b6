//! Physical feasibility checks for a solved pose.
//!
//! Four independent checks run on every evaluation:
//!
//! - [`check_leg_lengths`] - configured stroke and the degenerate band
//! - [`check_spacing`] - minimum distance among platform joints (3D) and
//!   base anchors (planar)
//! - [`check_joint_angles`] - leg tilt from vertical
//! - [`check_leg_collisions`] - closest distance between leg segments
//!
//! A pose that fails any enabled check is still a valid input: the outcome
//! is a [`ValidationResult`], never an error.

mod angles;
mod collision;
mod limits;
mod params;
mod spacing;

pub use angles::{AngleSeverity, AngleWarning, check_joint_angles, classify_angle};
pub use collision::{
    LegCollision, check_leg_collisions, closest_points_on_segments, segment_distance,
};
pub use limits::{LengthBound, LengthViolation, check_leg_lengths};
pub use params::ValidationParams;
pub use spacing::{PointSet, SpacingMode, SpacingViolation, check_spacing};

use nalgebra::{Point3, Vector3};
use platform_types::{Configuration, PlatformError, PlatformResult};
use tracing::debug;

use crate::solver::IkSolution;

/// One leg as a segment from base anchor to platform joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LegSegment {
    pub(crate) leg: usize,
    pub(crate) joint: usize,
    pub(crate) base: Point3<f64>,
    pub(crate) top: Point3<f64>,
}

impl LegSegment {
    pub(crate) fn vector(&self) -> Vector3<f64> {
        self.top - self.base
    }
}

/// Pairs each base anchor with its mapped joint, skipping out-of-range indices.
pub(crate) fn leg_segments<'a>(
    base_anchors: &'a [Point3<f64>],
    world_joints: &'a [Point3<f64>],
    leg_to_joint: &'a [usize],
) -> impl Iterator<Item = LegSegment> + 'a {
    base_anchors
        .iter()
        .zip(leg_to_joint)
        .enumerate()
        .filter_map(|(leg, (base, &joint))| {
            world_joints.get(joint).map(|top| LegSegment {
                leg,
                joint,
                base: *base,
                top: *top,
            })
        })
}

/// Outcome of validating one pose.
///
/// Each list holds the diagnostics of one check; a disabled check leaves its
/// list empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// Legs outside their length bounds.
    pub length_violations: Vec<LengthViolation>,

    /// First too-close pair per point set.
    pub spacing_violations: Vec<SpacingViolation>,

    /// Legs past the warning or cutoff angle.
    pub angle_warnings: Vec<AngleWarning>,

    /// Leg pairs closer than the collision distance.
    pub collisions: Vec<LegCollision>,
}

impl ValidationResult {
    /// `true` if every enabled check passed.
    ///
    /// Near-singular angle warnings do not fail validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lengths_ok() && self.spacing_ok() && self.angles_ok() && self.collisions_ok()
    }

    /// `true` if all legs are within bounds.
    #[must_use]
    pub fn lengths_ok(&self) -> bool {
        self.length_violations.is_empty()
    }

    /// `true` if no point pair is too close.
    #[must_use]
    pub fn spacing_ok(&self) -> bool {
        self.spacing_violations.is_empty()
    }

    /// `true` if no leg is past the cutoff angle.
    #[must_use]
    pub fn angles_ok(&self) -> bool {
        !self.angle_warnings.iter().any(|w| w.severity.is_failure())
    }

    /// `true` if no legs collide.
    #[must_use]
    pub fn collisions_ok(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Number of near-singular warnings that do not fail validation.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.angle_warnings.iter().filter(|w| !w.severity.is_failure()).count()
    }

    /// One-line description of the result.
    #[must_use]
    pub fn summary(&self) -> String {
        let unreachable = self.angle_warnings.len() - self.warning_count();
        let mut parts = Vec::new();
        if !self.length_violations.is_empty() {
            parts.push(format!("{} leg length violation(s)", self.length_violations.len()));
        }
        if let Some(first) = self.spacing_violations.first() {
            parts.push(format!(
                "{} {} and {} only {:.1} mm apart",
                first.set.as_str(),
                first.first,
                first.second,
                first.distance
            ));
        }
        if unreachable > 0 {
            parts.push(format!("{unreachable} leg(s) past the angle cutoff"));
        }
        if !self.collisions.is_empty() {
            parts.push(format!("{} colliding leg pair(s)", self.collisions.len()));
        }

        if parts.is_empty() {
            match self.warning_count() {
                0 => "Valid".to_string(),
                n => format!("Valid with {n} near-singular leg(s)"),
            }
        } else {
            format!("Invalid: {}", parts.join(", "))
        }
    }
}

/// Validates a solved pose against `config`.
///
/// `leg_lengths` and `base_anchors` are in leg order; `world_joints` holds
/// the distinct platform joints in the base frame.
///
/// # Errors
///
/// Returns [`PlatformError::MismatchedInput`] if a slice length disagrees
/// with the configuration's leg or joint count.
///
/// # Example
///
/// ```
/// use platform_kinematics::{solve, validate, ValidationParams};
/// use platform_types::{create_configuration, GeometryParams, LegLimits, Pose};
///
/// let params = GeometryParams::default()
///     .base_radius(120.0)
///     .platform_radius(70.0)
///     .nominal_leg_length(150.0)
///     .limits(LegLimits::new(140.0, 220.0));
/// let config = create_configuration("6-3", &params).unwrap();
/// let solution = solve(&config, &Pose::home());
///
/// let result = validate(
///     &config,
///     &solution.leg_lengths(),
///     solution.world_joints(),
///     config.anchors().base(),
///     &ValidationParams::default(),
/// )
/// .unwrap();
/// assert!(result.is_valid(), "{}", result.summary());
/// ```
pub fn validate(
    config: &Configuration,
    leg_lengths: &[f64],
    world_joints: &[Point3<f64>],
    base_anchors: &[Point3<f64>],
    params: &ValidationParams,
) -> PlatformResult<ValidationResult> {
    expect_count("leg lengths", config.leg_count(), leg_lengths.len())?;
    expect_count("world joints", config.joint_count(), world_joints.len())?;
    expect_count("base anchors", config.leg_count(), base_anchors.len())?;

    Ok(run_checks(config, leg_lengths, world_joints, base_anchors, params))
}

/// Validates an [`IkSolution`] produced for `config`.
#[must_use]
pub fn validate_solution(
    config: &Configuration,
    solution: &IkSolution,
    params: &ValidationParams,
) -> ValidationResult {
    run_checks(
        config,
        &solution.leg_lengths(),
        solution.world_joints(),
        config.anchors().base(),
        params,
    )
}

fn expect_count(what: &'static str, expected: usize, actual: usize) -> PlatformResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(PlatformError::MismatchedInput {
            what,
            expected,
            actual,
        })
    }
}

fn run_checks(
    config: &Configuration,
    leg_lengths: &[f64],
    world_joints: &[Point3<f64>],
    base_anchors: &[Point3<f64>],
    params: &ValidationParams,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    if params.check_lengths {
        result.length_violations =
            check_leg_lengths(leg_lengths, config.nominal_lengths(), config.limits(), params);
    }

    if params.check_spacing {
        let spacing = params.min_spacing;
        result.spacing_violations = [
            check_spacing(world_joints, spacing, SpacingMode::Spatial, PointSet::PlatformJoints),
            check_spacing(base_anchors, spacing, SpacingMode::Planar, PointSet::BaseAnchors),
        ]
        .into_iter()
        .flatten()
        .collect();
    }

    if params.check_angles {
        result.angle_warnings =
            check_joint_angles(base_anchors, world_joints, config.leg_to_joint(), params);
    }

    if params.check_collisions {
        result.collisions = check_leg_collisions(
            base_anchors,
            world_joints,
            config.leg_to_joint(),
            params.collision_distance,
        );
    }

    if !result.is_valid() {
        debug!(
            topology = %config.topology(),
            length_violations = result.length_violations.len(),
            spacing_violations = result.spacing_violations.len(),
            angle_warnings = result.angle_warnings.len(),
            collisions = result.collisions.len(),
            "Pose failed validation"
        );
    }

    result
}
