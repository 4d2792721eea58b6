//! Property-based tests for the kinematics pipeline.
//!
//! Run with: cargo test -p platform-kinematics -- proptest

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use nalgebra::Matrix3;
use platform_kinematics::{
    ForceBand, GridBounds, PointSet, PoseTransform, SpacingMode, ValidationParams, WorkspaceParams,
    check_leg_lengths, check_spacing, estimate_forces, rotation_matrix, sample_workspace,
    segment_distance, solve, validate, validate_solution,
};
use platform_types::{
    Configuration, GeometryParams, LegLimits, Orientation, Point3, Pose, Topology, Vector3,
    create_configuration, regular_polygon,
};
use proptest::prelude::*;

fn reference_params() -> GeometryParams {
    GeometryParams::default()
        .base_radius(120.0)
        .platform_radius(70.0)
        .nominal_leg_length(150.0)
        .limits(LegLimits::new(140.0, 220.0))
}

// =============================================================================
// Strategies
// =============================================================================

fn arb_angle() -> impl Strategy<Value = f64> {
    -180.0..180.0f64
}

fn arb_orientation() -> impl Strategy<Value = Orientation> {
    (arb_angle(), arb_angle(), arb_angle())
        .prop_map(|(r, p, y)| Orientation::from_degrees(r, p, y).unwrap())
}

fn arb_topology() -> impl Strategy<Value = Topology> {
    prop::sample::select(Topology::ALL.to_vec())
}

/// Poses near home that stay well inside the reference geometry's envelope.
fn arb_moderate_pose() -> impl Strategy<Value = Pose> {
    (
        -5.0..5.0f64,
        -5.0..5.0f64,
        155.0..165.0f64,
        -3.0..3.0f64,
        -3.0..3.0f64,
        -5.0..5.0f64,
    )
        .prop_map(|(x, y, z, roll, pitch, yaw)| Pose::new(x, y, z, roll, pitch, yaw).unwrap())
}

fn arb_pose() -> impl Strategy<Value = Pose> {
    (
        -200.0..200.0f64,
        -200.0..200.0f64,
        -50.0..400.0f64,
        arb_angle(),
        arb_angle(),
        arb_angle(),
    )
        .prop_map(|(x, y, z, roll, pitch, yaw)| Pose::new(x, y, z, roll, pitch, yaw).unwrap())
}

// =============================================================================
// Property Tests: Pose Transform
// =============================================================================

proptest! {
    /// The composed rotation is orthonormal for every angle triple.
    #[test]
    fn rotation_is_orthonormal(orientation in arb_orientation()) {
        let r = rotation_matrix(&orientation);
        let error = (r.transpose() * r - Matrix3::identity()).norm();
        prop_assert!(error < 1e-6, "RᵗR deviates by {}", error);
        prop_assert!((r.determinant() - 1.0).abs() < 1e-6);
    }

    /// Yaw alone keeps every joint at its radius.
    #[test]
    fn yaw_preserves_radial_distance(yaw in arb_angle(), topology in arb_topology()) {
        let config = Configuration::new(topology, &reference_params()).unwrap();
        let pose = Pose::new(0.0, 0.0, 0.0, 0.0, 0.0, yaw).unwrap();
        let transform = PoseTransform::from_pose(&pose);
        for local in config.anchors().joints() {
            let world = transform.apply(local);
            prop_assert!((world.coords.norm() - local.coords.norm()).abs() < 1e-6);
        }
    }

    /// Translation alone shifts joints by exactly the commanded offset.
    #[test]
    fn translation_only_offsets_joints(
        x in -200.0..200.0f64,
        y in -200.0..200.0f64,
        z in 0.0..400.0f64,
    ) {
        let config = Configuration::new(Topology::SixSix, &reference_params()).unwrap();
        let pose = Pose::new(x, y, z, 0.0, 0.0, 0.0).unwrap();
        let solution = solve(&config, &pose);
        for (world, local) in solution.world_joints().iter().zip(config.anchors().joints()) {
            prop_assert!((world.z - z).abs() < 1e-6);
            prop_assert!((world.x - local.x - x).abs() < 1e-6);
            prop_assert!((world.y - local.y - y).abs() < 1e-6);
        }
    }
}

// =============================================================================
// Property Tests: Solver
// =============================================================================

proptest! {
    /// Leg count and order never depend on the pose.
    #[test]
    fn solve_returns_one_length_per_leg(topology in arb_topology(), pose in arb_pose()) {
        let config = Configuration::new(topology, &reference_params()).unwrap();
        let solution = solve(&config, &pose);
        prop_assert_eq!(solution.leg_lengths().len(), topology.leg_count());
        prop_assert_eq!(solution.world_joints().len(), topology.joint_count());
        for (leg, expected) in solution.legs().iter().zip(config.anchors().base()) {
            prop_assert_eq!(leg.base_anchor, *expected);
            prop_assert!(leg.length >= 0.0);
        }
    }

    /// Solving is deterministic.
    #[test]
    fn solve_is_deterministic(topology in arb_topology(), pose in arb_pose()) {
        let config = Configuration::new(topology, &reference_params()).unwrap();
        prop_assert_eq!(solve(&config, &pose), solve(&config, &pose));
    }

    /// Legs sharing a joint on the standard 6-3 layout share an endpoint for any pose.
    #[test]
    fn six_three_pairs_share_joint(pose in arb_pose()) {
        let config = Configuration::new(Topology::SixThree, &reference_params()).unwrap();
        let solution = solve(&config, &pose);
        let legs = solution.legs();
        for pair in [(0, 1), (2, 3), (4, 5)] {
            prop_assert_eq!(legs[pair.0].world_joint, legs[pair.1].world_joint);
        }
    }

    /// The redundant variant solves identically to the standard 6-3.
    #[test]
    fn redundant_matches_standard(pose in arb_pose()) {
        let standard = Configuration::new(Topology::SixThree, &reference_params()).unwrap();
        let redundant =
            Configuration::new(Topology::SixThreeRedundant, &reference_params()).unwrap();
        prop_assert_eq!(
            solve(&standard, &pose).leg_lengths(),
            solve(&redundant, &pose).leg_lengths()
        );
    }
}

// =============================================================================
// Property Tests: Validation
// =============================================================================

proptest! {
    /// Small motions around home stay valid on the reference geometry.
    #[test]
    fn moderate_poses_are_valid(topology in arb_topology(), pose in arb_moderate_pose()) {
        let config = Configuration::new(topology, &reference_params()).unwrap();
        let solution = solve(&config, &pose);
        let result = validate_solution(&config, &solution, &ValidationParams::default());
        prop_assert!(result.is_valid(), "{}: {}", topology, result.summary());
    }

    /// Validation never panics and is idempotent.
    #[test]
    fn validation_is_idempotent(topology in arb_topology(), pose in arb_pose()) {
        let config = Configuration::new(topology, &reference_params()).unwrap();
        let solution = solve(&config, &pose);
        let params = ValidationParams::default();
        prop_assert_eq!(
            validate_solution(&config, &solution, &params),
            validate_solution(&config, &solution, &params)
        );
    }

    /// Any length below the configured minimum is reported for that leg.
    #[test]
    fn short_leg_is_named(leg in 0usize..6, length in 80.0..139.9f64) {
        let mut lengths = vec![170.0; 6];
        lengths[leg] = length;
        let violations = check_leg_lengths(
            &lengths,
            &[150.0; 6],
            LegLimits::new(140.0, 220.0),
            &ValidationParams::default(),
        );
        prop_assert_eq!(violations.len(), 1);
        prop_assert_eq!(violations[0].leg, leg);
    }

    /// Segment distance is symmetric and bounded by endpoint distances.
    #[test]
    fn segment_distance_symmetric(
        a in prop::array::uniform3(-100.0..100.0f64),
        b in prop::array::uniform3(-100.0..100.0f64),
        c in prop::array::uniform3(-100.0..100.0f64),
        d in prop::array::uniform3(-100.0..100.0f64),
    ) {
        let [a, b, c, d] = [a, b, c, d].map(Point3::from);
        let forward = segment_distance(&a, &b, &c, &d);
        let backward = segment_distance(&c, &d, &a, &b);
        prop_assert!((forward - backward).abs() < 1e-6);
        prop_assert!(forward <= (a - c).norm() + 1e-9);
        prop_assert!(forward <= (b - d).norm() + 1e-9);
    }

    /// Force bands never decrease as a leg lengthens.
    #[test]
    fn force_band_monotonic(short in 50.0..300.0f64, extra in 0.0..100.0f64) {
        let forces = estimate_forces(&[short, short + extra], &[150.0, 150.0]).unwrap();
        prop_assert!(forces[0].band <= forces[1].band);
        prop_assert!(forces[0].ratio <= forces[1].ratio);
    }
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn six_three_neutral_pairs_equal() {
    let config = create_configuration("6-3", &reference_params()).unwrap();
    let lengths = solve(&config, &Pose::new(0.0, 0.0, 160.0, 0.0, 0.0, 0.0).unwrap()).leg_lengths();
    assert_relative_eq!(lengths[0], lengths[1], epsilon = 1e-6);
    assert_relative_eq!(lengths[2], lengths[3], epsilon = 1e-6);
    assert_relative_eq!(lengths[4], lengths[5], epsilon = 1e-6);
}

#[test]
fn leg_counts_per_topology() {
    for (id, count) in [
        ("8-8", 8),
        ("6-6", 6),
        ("6-3", 6),
        ("6-3-asymmetric", 6),
        ("6-3-redundant", 6),
        ("4-4", 4),
        ("3-3", 3),
    ] {
        let config = create_configuration(id, &reference_params()).unwrap();
        assert_eq!(solve(&config, &Pose::home()).leg_lengths().len(), count, "{id}");
    }
}

#[test]
fn spacing_five_and_fifty_millimetres() {
    let triangle = |side: f64| regular_polygon(3, side / 3.0_f64.sqrt(), 0.0);
    let joints = |side: f64| {
        check_spacing(&triangle(side), 20.0, SpacingMode::Spatial, PointSet::PlatformJoints)
    };

    let close = joints(5.0).unwrap();
    assert_eq!((close.first, close.second), (0, 1));
    assert!(joints(50.0).is_none());
}

#[test]
fn length_limit_scenarios() {
    let limits = LegLimits::new(140.0, 220.0);
    let params = ValidationParams::default();
    let failing = check_leg_lengths(&[130.0], &[150.0], limits, &params);
    assert_eq!(failing[0].leg, 0);
    assert!(check_leg_lengths(&[180.0], &[150.0], limits, &params).is_empty());
}

#[test]
fn end_to_end_six_three() {
    let config = create_configuration("6-3", &reference_params()).unwrap();
    let solution = solve(&config, &Pose::new(0.0, 0.0, 160.0, 0.0, 0.0, 0.0).unwrap());
    let lengths = solution.leg_lengths();

    assert_eq!(lengths.len(), 6);
    assert!(lengths.iter().all(|&l| l > 0.0));
    assert_relative_eq!(lengths[0], lengths[1], epsilon = 1e-6);

    let result = validate(
        &config,
        &lengths,
        solution.world_joints(),
        config.anchors().base(),
        &ValidationParams::default(),
    )
    .unwrap();
    assert!(result.is_valid(), "{}", result.summary());
}

#[test]
fn sample_workspace_is_deterministic() {
    let config = create_configuration("6-3", &reference_params()).unwrap();
    let params = WorkspaceParams::default()
        .with_bounds(GridBounds::centered(
            Point3::new(0.0, 0.0, 160.0),
            Vector3::new(60.0, 60.0, 40.0),
        ))
        .with_step(10.0);
    let reference = Pose::new(0.0, 0.0, 160.0, 3.0, -2.0, 5.0).unwrap();

    let first = sample_workspace(&config, &reference, &params).unwrap();
    let second = sample_workspace(&config, &reference, &params).unwrap();
    assert_eq!(first, second);
    assert!(first.reachable_count() > 0);
}

#[test]
fn force_bands_for_reference_lengths() {
    let forces = estimate_forces(&[140.0, 150.0, 200.0], &[150.0; 3]).unwrap();
    assert_eq!(forces[0].band, ForceBand::Normal);
    assert_eq!(forces[1].band, ForceBand::Moderate);
    assert_eq!(forces[2].band, ForceBand::High);
}
