//! Inverse kinematics and workspace safety analysis for parallel platforms.
//!
//! Given a [`Configuration`](platform_types::Configuration) and a desired
//! [`Pose`](platform_types::Pose), this crate computes every actuator length
//! and decides whether the pose is physically feasible.
//!
//! # Pipeline
//!
//! ```text
//! Configuration + Pose -> PoseTransform -> world joints -> solve -> lengths
//!                                                              |
//!                                                          validate -> ValidationResult
//! ```
//!
//! - [`PoseTransform`] - `R = Rz(yaw) · Ry(pitch) · Rx(roll)`, `world = R·local + t`
//! - [`solve`] - per-leg length and extension, closed form
//! - [`validate`] - length limits, spacing, joint angles, leg collisions
//! - [`WorkspaceSampler`] - reachable translations at a fixed orientation
//! - [`estimate_forces`] - presentational force bands
//! - [`compare_topologies`] - stroke statistics across layouts
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Every operation
//! is a pure function of its inputs; identical inputs give bit-identical
//! outputs, including the parallel workspace sweep.
//!
//! # Example
//!
//! ```
//! use platform_kinematics::{estimate_forces, solve, validate_solution, ValidationParams};
//! use platform_types::{create_configuration, GeometryParams, LegLimits, Pose};
//!
//! let params = GeometryParams::default()
//!     .base_radius(120.0)
//!     .platform_radius(70.0)
//!     .nominal_leg_length(150.0)
//!     .limits(LegLimits::new(140.0, 220.0));
//! let config = create_configuration("6-3", &params).unwrap();
//!
//! let pose = Pose::new(0.0, 0.0, 160.0, 5.0, -3.0, 0.0).unwrap();
//! let solution = solve(&config, &pose);
//! let result = validate_solution(&config, &solution, &ValidationParams::default());
//! assert!(result.is_valid());
//!
//! let forces = estimate_forces(&solution.leg_lengths(), config.nominal_lengths()).unwrap();
//! assert_eq!(forces.len(), 6);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Serialization for parameters, workspace points and reports

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod compare;
mod force;
mod solver;
mod transform;
mod validation;
mod workspace;

pub use compare::{
    ComparisonCase, PoseReport, STANDARD_TILTS, TopologyReport, compare_all, compare_topologies,
    standard_cases,
};
pub use force::{
    ForceBand, ForceEstimate, HIGH_RATIO, MODERATE_RATIO, estimate_force, estimate_forces,
};
pub use solver::{
    IkSolution, LegSolution, LegState, angle_from_vertical_deg, solve, solve_with_transform,
};
pub use transform::{
    PoseTransform, rotation_matrix, rotation_x, rotation_y, rotation_z, transform_points,
};
pub use validation::{
    AngleSeverity, AngleWarning, LegCollision, LengthBound, LengthViolation, PointSet, SpacingMode,
    SpacingViolation, ValidationParams, ValidationResult, check_joint_angles, check_leg_collisions,
    check_leg_lengths, check_spacing, classify_angle, closest_points_on_segments, segment_distance,
    validate, validate_solution,
};
pub use workspace::{
    DistanceBand, GridBounds, WorkspaceEnvelope, WorkspaceParams, WorkspacePoint, WorkspaceSampler,
    sample_workspace,
};
