//! Request/response messages for a pose-serving boundary.
//!
//! Messages are plain serde structs; the transport is up to the caller.
//! Field names and defaults follow the JSON shape
//! `{x, y, z, roll, pitch, yaw, configuration}` in and
//! `{leg_lengths, valid, configuration, pose}` out.

use platform_kinematics::{ValidationParams, solve, validate_solution};
use platform_types::{
    Configuration, GeometryParams, HOME_HEIGHT, LegLimits, Orientation, PlatformResult, Pose,
    Topology,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LevelingConfig;
use crate::controller::correction_target;

const DEFAULT_TOPOLOGY: &str = "6-3";

fn default_topology() -> String {
    DEFAULT_TOPOLOGY.to_owned()
}

const fn default_height() -> f64 {
    HOME_HEIGHT
}

/// Geometry override carried by a request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryRequest {
    /// Base radius in mm.
    pub base_radius: f64,
    /// Platform radius in mm.
    pub platform_radius: f64,
    /// Nominal leg length in mm.
    pub nominal_leg_length: f64,
    /// Minimum leg length in mm.
    pub min_leg_length: f64,
    /// Maximum leg length in mm.
    pub max_leg_length: f64,
}

impl Default for GeometryRequest {
    fn default() -> Self {
        Self::from(&GeometryParams::default())
    }
}

impl From<&GeometryParams> for GeometryRequest {
    fn from(params: &GeometryParams) -> Self {
        Self {
            base_radius: params.base_radius,
            platform_radius: params.platform_radius,
            nominal_leg_length: params.nominal_leg_length,
            min_leg_length: params.limits.min,
            max_leg_length: params.limits.max,
        }
    }
}

impl GeometryRequest {
    /// Geometry parameters with zero base phase.
    #[must_use]
    pub fn to_params(&self) -> GeometryParams {
        GeometryParams::default()
            .base_radius(self.base_radius)
            .platform_radius(self.platform_radius)
            .nominal_leg_length(self.nominal_leg_length)
            .limits(LegLimits::new(self.min_leg_length, self.max_leg_length))
    }
}

/// Request to solve one pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseRequest {
    /// X translation in mm.
    #[serde(default)]
    pub x: f64,
    /// Y translation in mm.
    #[serde(default)]
    pub y: f64,
    /// Z translation in mm.
    #[serde(default = "default_height")]
    pub z: f64,
    /// Roll in degrees.
    #[serde(default)]
    pub roll: f64,
    /// Pitch in degrees.
    #[serde(default)]
    pub pitch: f64,
    /// Yaw in degrees.
    #[serde(default)]
    pub yaw: f64,
    /// Topology id.
    #[serde(default = "default_topology")]
    pub configuration: String,
    /// Geometry override; defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryRequest>,
}

impl Default for PoseRequest {
    fn default() -> Self {
        Self::from_pose(&Pose::home(), DEFAULT_TOPOLOGY)
    }
}

impl PoseRequest {
    /// Request for `pose` on topology `configuration`.
    #[must_use]
    pub fn from_pose(pose: &Pose, configuration: impl Into<String>) -> Self {
        let [roll, pitch, yaw] = pose.orientation().to_degrees();
        Self {
            x: pose.x(),
            y: pose.y(),
            z: pose.z(),
            roll,
            pitch,
            yaw,
            configuration: configuration.into(),
            geometry: None,
        }
    }

    /// Validated pose.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NonFinitePose`](platform_types::PlatformError::NonFinitePose)
    /// for a non-finite component.
    pub fn pose(&self) -> PlatformResult<Pose> {
        Pose::new(self.x, self.y, self.z, self.roll, self.pitch, self.yaw)
    }

    /// Geometry parameters, falling back to defaults.
    #[must_use]
    pub fn geometry_params(&self) -> GeometryParams {
        self.geometry.unwrap_or_default().to_params()
    }
}

/// Pose as echoed in a response, degrees and millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseEcho {
    /// X translation.
    pub x: f64,
    /// Y translation.
    pub y: f64,
    /// Z translation.
    pub z: f64,
    /// Roll.
    pub roll: f64,
    /// Pitch.
    pub pitch: f64,
    /// Yaw.
    pub yaw: f64,
}

impl From<&Pose> for PoseEcho {
    fn from(pose: &Pose) -> Self {
        let [roll, pitch, yaw] = pose.orientation().to_degrees();
        Self {
            x: pose.x(),
            y: pose.y(),
            z: pose.z(),
            roll,
            pitch,
            yaw,
        }
    }
}

/// Solved leg lengths for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegLengthResponse {
    /// Leg lengths in mm, in leg order.
    pub leg_lengths: Vec<f64>,
    /// Whether the pose passed every feasibility check.
    pub valid: bool,
    /// Topology id used.
    pub configuration: String,
    /// Pose that was solved.
    pub pose: PoseEcho,
}

/// Request to level a platform measured at the given orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRequest {
    /// Measured roll in degrees.
    pub roll: f64,
    /// Measured pitch in degrees.
    pub pitch: f64,
    /// Measured yaw in degrees.
    #[serde(default)]
    pub yaw: f64,
    /// Topology id.
    #[serde(default = "default_topology")]
    pub configuration: String,
    /// Geometry override; defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryRequest>,
}

/// One entry in the topology listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyListing {
    /// Topology id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Number of legs.
    pub num_legs: usize,
}

impl From<Topology> for TopologyListing {
    fn from(topology: Topology) -> Self {
        Self {
            id: topology.id().to_owned(),
            name: topology.name().to_owned(),
            description: topology.description().to_owned(),
            num_legs: topology.leg_count(),
        }
    }
}

/// Every supported topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyCatalog {
    /// Listings in catalogue order.
    pub configurations: Vec<TopologyListing>,
}

/// Listing of every supported topology.
#[must_use]
pub fn available_topologies() -> TopologyCatalog {
    TopologyCatalog {
        configurations: Topology::ALL.into_iter().map(TopologyListing::from).collect(),
    }
}

fn respond(
    config: &Configuration,
    pose: &Pose,
    validation: &ValidationParams,
) -> LegLengthResponse {
    let solution = solve(config, pose);
    let result = validate_solution(config, &solution, validation);
    debug!(
        topology = %config.topology(),
        valid = result.is_valid(),
        "Answered pose request"
    );
    LegLengthResponse {
        leg_lengths: solution.leg_lengths(),
        valid: result.is_valid(),
        configuration: config.topology().id().to_owned(),
        pose: PoseEcho::from(pose),
    }
}

/// Solves and validates a pose request.
///
/// # Errors
///
/// Returns an invalid-pose error for non-finite components and a
/// configuration error for an unknown topology or bad geometry.
///
/// # Example
///
/// ```
/// use platform_kinematics::ValidationParams;
/// use platform_leveling::{handle_pose_request, PoseRequest};
///
/// let request: PoseRequest = serde_json::from_str(r#"{"roll": 2.0, "configuration": "6-6"}"#).unwrap();
/// let response = handle_pose_request(&request, &ValidationParams::default()).unwrap();
/// assert_eq!(response.leg_lengths.len(), 6);
/// assert_eq!(response.configuration, "6-6");
/// ```
pub fn handle_pose_request(
    request: &PoseRequest,
    validation: &ValidationParams,
) -> PlatformResult<LegLengthResponse> {
    let pose = request.pose()?;
    let topology: Topology = request.configuration.parse()?;
    let config = Configuration::new(topology, &request.geometry_params())?;
    Ok(respond(&config, &pose, validation))
}

/// Solves the pose that cancels a measured orientation.
///
/// The correction is applied in one step at `settings.height`; the rate limit,
/// deadband and level threshold only apply to
/// [`LevelingController`](crate::LevelingController).
///
/// # Errors
///
/// Returns an invalid-pose error for non-finite angles, a configuration error
/// for an unknown topology or bad geometry, and an error for invalid settings.
pub fn handle_level_request(
    request: &LevelRequest,
    settings: &LevelingConfig,
    validation: &ValidationParams,
) -> PlatformResult<LegLengthResponse> {
    settings.validate()?;
    let measured = Orientation::from_degrees(request.roll, request.pitch, request.yaw)?;
    let topology: Topology = request.configuration.parse()?;
    let params = request.geometry.unwrap_or_default().to_params();
    let config = Configuration::new(topology, &params)?;
    let pose = Pose::new(0.0, 0.0, settings.height, 0.0, 0.0, 0.0)?
        .with_orientation(correction_target(&measured, settings.mode));
    Ok(respond(&config, &pose, validation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelingMode;
    use approx::assert_relative_eq;
    use platform_types::PlatformError;

    #[test]
    fn test_request_defaults() {
        let request: PoseRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, PoseRequest::default());
        assert_relative_eq!(request.z, HOME_HEIGHT);
        assert_eq!(request.configuration, "6-3");
        assert!(request.geometry.is_none());
    }

    #[test]
    fn test_geometry_defaults_match_params() {
        let geometry: GeometryRequest = serde_json::from_str(r#"{"base_radius": 130.0}"#).unwrap();
        assert_relative_eq!(geometry.base_radius, 130.0);
        assert_relative_eq!(geometry.min_leg_length, 100.0);
        assert_relative_eq!(geometry.max_leg_length, 200.0);
        assert_eq!(GeometryRequest::default().to_params(), GeometryParams::default());
    }

    #[test]
    fn test_unknown_topology() {
        let request = PoseRequest {
            configuration: "5-5".into(),
            ..PoseRequest::default()
        };
        let err = handle_pose_request(&request, &ValidationParams::default()).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_non_finite_rejected_before_solving() {
        let request = PoseRequest {
            pitch: f64::NAN,
            configuration: "5-5".into(),
            ..PoseRequest::default()
        };
        let err = handle_pose_request(&request, &ValidationParams::default()).unwrap_err();
        assert!(err.is_invalid_pose());
    }

    #[test]
    fn test_bad_geometry() {
        let request = PoseRequest {
            geometry: Some(GeometryRequest {
                platform_radius: 0.0,
                ..GeometryRequest::default()
            }),
            ..PoseRequest::default()
        };
        let err = handle_pose_request(&request, &ValidationParams::default()).unwrap_err();
        assert!(matches!(err, PlatformError::NonPositiveParameter { .. }));
    }

    #[test]
    fn test_out_of_limits_is_invalid_not_error() {
        let request = PoseRequest {
            z: 260.0,
            ..PoseRequest::default()
        };
        let response = handle_pose_request(&request, &ValidationParams::default()).unwrap();
        assert!(!response.valid);
        assert!(response.leg_lengths.iter().all(|&l| l > 200.0));
    }

    #[test]
    fn test_level_request() {
        let request = LevelRequest {
            roll: 4.0,
            pitch: -2.0,
            yaw: 9.0,
            configuration: "6-3".into(),
            geometry: None,
        };
        let settings = LevelingConfig::default();
        let response =
            handle_level_request(&request, &settings, &ValidationParams::default()).unwrap();
        assert!(response.valid);
        assert_relative_eq!(response.pose.roll, -4.0, epsilon = 1e-9);
        assert_relative_eq!(response.pose.pitch, 2.0, epsilon = 1e-9);
        assert_relative_eq!(response.pose.yaw, 0.0);
        assert_relative_eq!(response.pose.z, HOME_HEIGHT);

        let full = settings.with_mode(LevelingMode::Full);
        let response = handle_level_request(&request, &full, &ValidationParams::default()).unwrap();
        assert_relative_eq!(response.pose.yaw, -9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_catalog() {
        let catalog = available_topologies();
        assert_eq!(catalog.configurations.len(), 7);
        let eight = catalog.configurations.iter().find(|t| t.id == "8-8").unwrap();
        assert_eq!(eight.num_legs, 8);
    }
}
