//! Property-based and wire-format tests for the leveling crate.
//!
//! Run with: cargo test -p platform-leveling

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use platform_kinematics::{ValidationParams, solve, validate_solution};
use platform_leveling::{
    LegLengthResponse, LevelRequest, LevelingConfig, LevelingController, LevelingDecision,
    PoseRequest, PoseSource, SinusoidalMotion, SinusoidalPoseSource, available_topologies,
    handle_level_request, handle_pose_request,
};
use platform_types::{Configuration, GeometryParams, LegLimits, Orientation, Topology};
use proptest::prelude::*;

fn reference_config() -> Configuration {
    let params = GeometryParams::default()
        .base_radius(120.0)
        .platform_radius(70.0)
        .nominal_leg_length(150.0)
        .limits(LegLimits::new(140.0, 220.0));
    Configuration::new(Topology::SixThree, &params).unwrap()
}

fn controller(settings: LevelingConfig) -> LevelingController {
    LevelingController::new(reference_config(), settings, ValidationParams::default()).unwrap()
}

// =============================================================================
// Strategies
// =============================================================================

fn arb_tilt() -> impl Strategy<Value = Orientation> {
    (-8.0..8.0f64, -8.0..8.0f64, -8.0..8.0f64)
        .prop_map(|(r, p, y)| Orientation::from_degrees(r, p, y).unwrap())
}

// =============================================================================
// Controller Properties
// =============================================================================

proptest! {
    #[test]
    fn commanded_step_never_exceeds_rate_limit(
        measurements in prop::collection::vec(arb_tilt(), 1..20),
    ) {
        let settings = LevelingConfig::default();
        let limit = settings.step_limit_deg();
        let mut controller = controller(settings);

        for measured in &measurements {
            let before = controller.commanded().to_degrees();
            let _ = controller.update(measured);
            let after = controller.commanded().to_degrees();
            for axis in 0..3 {
                prop_assert!((after[axis] - before[axis]).abs() <= limit + 1e-9);
            }
        }
    }

    #[test]
    fn steady_measurement_converges_to_target(measured in arb_tilt()) {
        prop_assume!(measured.tilt_deg() >= 3.0);
        let mut controller = controller(LevelingConfig::default());

        // 8 degrees at 2.5 degrees per tick needs at most 4 ticks.
        for _ in 0..5 {
            let decision = controller.update(&measured);
            prop_assert!(!decision.is_rejected());
        }

        prop_assert!(!controller.is_converging());
        let commanded = controller.commanded();
        prop_assert!((commanded.roll_deg() + measured.roll_deg()).abs() < 1e-9);
        prop_assert!((commanded.pitch_deg() + measured.pitch_deg()).abs() < 1e-9);
        prop_assert!(commanded.yaw_deg().abs() < 1e-12);
    }

    #[test]
    fn every_command_is_feasible(measurements in prop::collection::vec(arb_tilt(), 1..10)) {
        let config = reference_config();
        let params = ValidationParams::default();
        let mut controller = controller(LevelingConfig::default());

        for measured in &measurements {
            if let LevelingDecision::Command(command) = controller.update(measured) {
                let solution = solve(&config, &command.pose);
                prop_assert!(validate_solution(&config, &solution, &params).is_valid());
                prop_assert_eq!(solution.leg_lengths(), command.leg_lengths);
            }
        }
    }

    #[test]
    fn sinusoidal_poses_stay_within_amplitude(ticks in 1usize..200, dt in 0.01..0.5f64) {
        let motion = SinusoidalMotion::default();
        let mut source = SinusoidalPoseSource::new(motion.clone(), dt).unwrap();
        for pose in source.take_poses(ticks) {
            prop_assert!(pose.orientation().roll_deg().abs() <= motion.roll.amplitude + 1e-9);
            prop_assert!(pose.orientation().pitch_deg().abs() <= motion.pitch.amplitude + 1e-9);
            prop_assert!((pose.z() - 160.0).abs() <= motion.z.amplitude + 1e-9);
        }
    }
}

// =============================================================================
// Wire Format
// =============================================================================

#[test]
fn pose_request_json_round_trip() {
    let json = r#"{
        "x": 1.5, "y": -2.0, "z": 170.0,
        "roll": 3.0, "pitch": -1.0, "yaw": 4.0,
        "configuration": "6-3-asymmetric"
    }"#;
    let request: PoseRequest = serde_json::from_str(json).unwrap();
    let encoded = serde_json::to_string(&request).unwrap();
    assert!(!encoded.contains("geometry"));
    let decoded: PoseRequest = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn response_has_expected_shape() {
    let request = PoseRequest::default();
    let response = handle_pose_request(&request, &ValidationParams::default()).unwrap();
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["configuration"], "6-3");
    assert_eq!(value["valid"], true);
    assert_eq!(value["leg_lengths"].as_array().unwrap().len(), 6);
    assert_eq!(value["pose"]["z"], 160.0);

    let decoded: LegLengthResponse = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, response);
}

#[test]
fn response_matches_direct_solve() {
    let json = r#"{
        "x": 2.0, "roll": 5.0, "configuration": "4-4",
        "geometry": {"min_leg_length": 140.0, "max_leg_length": 220.0}
    }"#;
    let request: PoseRequest = serde_json::from_str(json).unwrap();
    let response = handle_pose_request(&request, &ValidationParams::default()).unwrap();

    let config = Configuration::new(Topology::FourFour, &request.geometry_params()).unwrap();
    let solution = solve(&config, &request.pose().unwrap());
    assert_eq!(response.leg_lengths, solution.leg_lengths());
}

#[test]
fn level_request_defaults_yaw_and_topology() {
    let request: LevelRequest = serde_json::from_str(r#"{"roll": 3.0, "pitch": 1.0}"#).unwrap();
    assert_eq!(request.configuration, "6-3");
    let settings = LevelingConfig::default();
    let response =
        handle_level_request(&request, &settings, &ValidationParams::default()).unwrap();
    assert!(response.valid);
    assert_relative_eq!(response.pose.roll, -3.0, epsilon = 1e-9);
    assert_relative_eq!(response.pose.pitch, -1.0, epsilon = 1e-9);
}

#[test]
fn catalog_serializes_like_listing() {
    let value = serde_json::to_value(available_topologies()).unwrap();
    let entries = value["configurations"].as_array().unwrap();
    assert_eq!(entries.len(), Topology::ALL.len());
    assert_eq!(entries[0]["id"], "3-3");
    assert_eq!(entries[0]["num_legs"], 3);
}
