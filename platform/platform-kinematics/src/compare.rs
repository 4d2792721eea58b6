//! Side-by-side evaluation of topologies over a pose set.

use platform_types::{Configuration, GeometryParams, HOME_HEIGHT, PlatformResult, Pose, Topology};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::solver::solve;
use crate::validation::{ValidationParams, validate_solution};

/// A named pose to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonCase {
    /// Short label, e.g. `5° Roll`.
    pub label: String,
    /// Pose to solve.
    pub pose: Pose,
}

impl ComparisonCase {
    /// Creates a case.
    #[must_use]
    pub fn new(label: impl Into<String>, pose: Pose) -> Self {
        Self {
            label: label.into(),
            pose,
        }
    }
}

/// Roll/pitch/yaw combinations used for comparing topologies, in degrees.
pub const STANDARD_TILTS: [(f64, f64, f64, &str); 10] = [
    (0.0, 0.0, 0.0, "Level"),
    (5.0, 0.0, 0.0, "5° Roll"),
    (0.0, 5.0, 0.0, "5° Pitch"),
    (5.0, 5.0, 0.0, "5° Roll + 5° Pitch"),
    (10.0, 0.0, 0.0, "10° Roll"),
    (0.0, 10.0, 0.0, "10° Pitch"),
    (10.0, 10.0, 0.0, "10° Roll + 10° Pitch"),
    (15.0, 0.0, 0.0, "15° Roll"),
    (0.0, 15.0, 0.0, "15° Pitch"),
    (10.0, 10.0, 15.0, "10° Roll + 10° Pitch + 15° Yaw"),
];

/// The standard tilt cases at the home translation.
///
/// # Errors
///
/// Returns [`PlatformError::NonFinitePose`](platform_types::PlatformError::NonFinitePose)
/// if `height` is not finite.
pub fn standard_cases(height: f64) -> PlatformResult<Vec<ComparisonCase>> {
    STANDARD_TILTS
        .iter()
        .map(|&(roll, pitch, yaw, label)| {
            let pose = Pose::new(0.0, 0.0, height, roll, pitch, yaw)?;
            Ok(ComparisonCase::new(label, pose))
        })
        .collect()
}

/// Outcome of one pose on one topology.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoseReport {
    /// Case label.
    pub label: String,
    /// Whether the pose passed validation.
    pub valid: bool,
    /// Solved leg lengths.
    pub leg_lengths: Vec<f64>,
    /// Longest minus shortest leg.
    pub stroke_range: f64,
    /// Longest leg.
    pub max_length: f64,
}

/// All cases evaluated on one topology.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TopologyReport {
    /// Topology evaluated.
    pub topology: Topology,
    /// One report per case, in case order.
    pub poses: Vec<PoseReport>,
}

impl TopologyReport {
    /// Number of valid cases.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.poses.iter().filter(|p| p.valid).count()
    }

    /// Mean stroke range over valid cases, `None` if none are valid.
    #[must_use]
    pub fn average_stroke_range(&self) -> Option<f64> {
        self.mean_over_valid(|p| p.stroke_range)
    }

    /// Mean longest leg over valid cases, `None` if none are valid.
    #[must_use]
    pub fn average_max_length(&self) -> Option<f64> {
        self.mean_over_valid(|p| p.max_length)
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_over_valid(&self, value: impl Fn(&PoseReport) -> f64) -> Option<f64> {
        let valid: Vec<f64> = self.poses.iter().filter(|p| p.valid).map(value).collect();
        (!valid.is_empty()).then(|| valid.iter().sum::<f64>() / valid.len() as f64)
    }
}

/// Evaluates every case on every topology with shared geometry parameters.
///
/// # Errors
///
/// Returns a configuration error if `params` are invalid.
///
/// # Example
///
/// ```
/// use platform_kinematics::{compare_topologies, standard_cases, ValidationParams};
/// use platform_types::{GeometryParams, LegLimits, Topology, HOME_HEIGHT};
///
/// let params = GeometryParams::default().limits(LegLimits::new(140.0, 220.0));
/// let cases = standard_cases(HOME_HEIGHT).unwrap();
/// let reports = compare_topologies(
///     &[Topology::ThreeThree, Topology::SixThree],
///     &params,
///     &cases,
///     &ValidationParams::default(),
/// )
/// .unwrap();
///
/// assert_eq!(reports.len(), 2);
/// assert_eq!(reports[0].poses.len(), cases.len());
/// assert_eq!(reports[0].poses[0].leg_lengths.len(), 3);
/// ```
pub fn compare_topologies(
    topologies: &[Topology],
    params: &GeometryParams,
    cases: &[ComparisonCase],
    validation: &ValidationParams,
) -> PlatformResult<Vec<TopologyReport>> {
    topologies
        .iter()
        .map(|&topology| {
            let config = Configuration::new(topology, params)?;
            let poses = cases
                .iter()
                .map(|case| {
                    let solution = solve(&config, &case.pose);
                    PoseReport {
                        label: case.label.clone(),
                        valid: validate_solution(&config, &solution, validation).is_valid(),
                        leg_lengths: solution.leg_lengths(),
                        stroke_range: solution.stroke_range(),
                        max_length: solution.max_length(),
                    }
                })
                .collect();
            let report = TopologyReport { topology, poses };
            debug!(
                topology = %topology,
                valid = report.valid_count(),
                cases = cases.len(),
                "Compared topology"
            );
            Ok(report)
        })
        .collect()
}

/// Compares every supported topology over the standard cases at the home height.
///
/// # Errors
///
/// Returns a configuration error if `params` are invalid.
pub fn compare_all(
    params: &GeometryParams,
    validation: &ValidationParams,
) -> PlatformResult<Vec<TopologyReport>> {
    compare_topologies(&Topology::ALL, params, &standard_cases(HOME_HEIGHT)?, validation)
}
