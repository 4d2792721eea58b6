//! Immutable platform configuration.
//!
//! A [`Configuration`] is built once per topology/geometry selection and
//! rebuilt whenever a parameter changes. It owns the anchor layout so that
//! repeated solves never recompute it.

use tracing::{debug, warn};

use crate::error::PlatformResult;
use crate::geometry::{AnchorSet, build_anchors};
use crate::params::{GeometryParams, LegLimits};
use crate::topology::Topology;

/// Complete geometric description of one platform.
///
/// # Example
///
/// ```
/// use platform_types::{Configuration, GeometryParams, Topology};
///
/// let config = Configuration::new(Topology::SixThree, &GeometryParams::default()).unwrap();
/// assert_eq!(config.leg_count(), 6);
/// assert_eq!(config.joint_count(), 3);
/// assert_eq!(config.anchors().base().len(), 6);
/// assert_eq!(config.anchors().joints().len(), 3);
/// assert!((config.platform_phase().to_degrees() - 30.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    topology: Topology,
    params: GeometryParams,
    base_phase: f64,
    platform_phase: f64,
    nominal_lengths: Vec<f64>,
    anchors: AnchorSet,
}

impl Configuration {
    /// Builds the configuration for `topology` from `params`.
    ///
    /// A platform radius at least as large as the base radius is accepted
    /// with a logged warning.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any parameter is non-positive,
    /// non-finite, or the leg limits are inverted.
    pub fn new(topology: Topology, params: &GeometryParams) -> PlatformResult<Self> {
        params.validate()?;

        if params.platform_wider_than_base() {
            warn!(
                topology = %topology,
                base_radius = params.base_radius,
                platform_radius = params.platform_radius,
                "Platform radius is not smaller than base radius"
            );
        }

        let base_phase = params.base_phase_deg.to_radians();
        let platform_phase =
            (params.base_phase_deg + topology.platform_phase_offset_deg()).to_radians();

        let anchors = build_anchors(topology, params);

        debug!(
            topology = %topology,
            legs = topology.leg_count(),
            joints = topology.joint_count(),
            "Built platform configuration"
        );
        if topology == Topology::SixThreeRedundant {
            debug!("6-3-redundant shares the standard 6-3 leg mapping");
        }

        Ok(Self {
            topology,
            params: params.clone(),
            base_phase,
            platform_phase,
            nominal_lengths: vec![params.nominal_leg_length; topology.leg_count()],
            anchors,
        })
    }

    /// The topology this configuration was built for.
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// The parameters this configuration was built from.
    #[must_use]
    pub const fn params(&self) -> &GeometryParams {
        &self.params
    }

    /// Base anchor circle radius.
    #[must_use]
    pub const fn base_radius(&self) -> f64 {
        self.params.base_radius
    }

    /// Platform joint circle radius.
    #[must_use]
    pub const fn platform_radius(&self) -> f64 {
        self.params.platform_radius
    }

    /// Angle of base anchor 0, in radians.
    #[must_use]
    pub const fn base_phase(&self) -> f64 {
        self.base_phase
    }

    /// Angle of platform joint 0, in radians.
    #[must_use]
    pub const fn platform_phase(&self) -> f64 {
        self.platform_phase
    }

    /// Nominal length of each leg, in leg order.
    #[must_use]
    pub fn nominal_lengths(&self) -> &[f64] {
        &self.nominal_lengths
    }

    /// Actuator length limits.
    #[must_use]
    pub const fn limits(&self) -> LegLimits {
        self.params.limits
    }

    /// Number of legs.
    #[must_use]
    pub fn leg_count(&self) -> usize {
        self.topology.leg_count()
    }

    /// Number of distinct platform joints.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.topology.joint_count()
    }

    /// Platform joint index for each leg.
    #[must_use]
    pub fn leg_to_joint(&self) -> &'static [usize] {
        self.topology.leg_to_joint()
    }

    /// Anchor layout.
    #[must_use]
    pub const fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    /// Returns a configuration with the same geometry but different limits.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `limits` are invalid.
    pub fn with_limits(&self, limits: LegLimits) -> PlatformResult<Self> {
        Self::new(self.topology, &self.params.clone().limits(limits))
    }
}

/// Builds a configuration from a boundary topology id.
///
/// # Errors
///
/// Returns [`PlatformError::UnknownTopology`](crate::PlatformError::UnknownTopology)
/// for an unrecognised id, or a parameter error from [`Configuration::new`].
///
/// # Example
///
/// ```
/// use platform_types::{create_configuration, GeometryParams};
///
/// let config = create_configuration("8-8", &GeometryParams::default()).unwrap();
/// assert_eq!(config.leg_count(), 8);
///
/// let error = create_configuration("hexapod", &GeometryParams::default()).unwrap_err();
/// assert!(error.is_configuration_error());
/// ```
pub fn create_configuration(
    topology_id: &str,
    params: &GeometryParams,
) -> PlatformResult<Configuration> {
    Configuration::new(topology_id.parse()?, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlatformError;
    use approx::assert_relative_eq;

    fn reference_params() -> GeometryParams {
        GeometryParams::default()
            .base_radius(120.0)
            .platform_radius(70.0)
            .nominal_leg_length(150.0)
            .limits(LegLimits::new(140.0, 220.0))
    }

    #[test]
    fn test_counts_for_every_topology() {
        for topology in Topology::ALL {
            let config = Configuration::new(topology, &reference_params()).unwrap();
            assert_eq!(config.anchors().base().len(), topology.leg_count());
            assert_eq!(config.anchors().joints().len(), topology.joint_count());
            assert_eq!(config.nominal_lengths().len(), topology.leg_count());
            assert_eq!(config.leg_to_joint().len(), topology.leg_count());
        }
    }

    #[test]
    fn test_anchor_radii() {
        let config = Configuration::new(Topology::SixSix, &reference_params()).unwrap();
        for anchor in config.anchors().base() {
            assert_relative_eq!(anchor.coords.norm(), 120.0, epsilon = 1e-10);
        }
        for joint in config.anchors().joints() {
            assert_relative_eq!(joint.coords.norm(), 70.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_six_three_joints_straddled() {
        let config = Configuration::new(Topology::SixThree, &reference_params()).unwrap();
        let base = config.anchors().base();
        let joints = config.anchors().joints();
        // Joint 0 sits on the bisector of anchors 0 and 1.
        let d0 = (base[0].xy() - joints[0].xy()).norm();
        let d1 = (base[1].xy() - joints[0].xy()).norm();
        assert_relative_eq!(d0, d1, epsilon = 1e-10);
    }

    #[test]
    fn test_asymmetric_has_no_phase_offset() {
        let config = Configuration::new(Topology::SixThreeAsymmetric, &reference_params()).unwrap();
        assert_relative_eq!(config.platform_phase(), config.base_phase());
        assert_eq!(config.leg_to_joint(), &[0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn test_base_phase_rotates_both_sets() {
        let params = reference_params().base_phase_deg(10.0);
        let config = Configuration::new(Topology::SixThree, &params).unwrap();
        assert_relative_eq!(config.base_phase().to_degrees(), 10.0, epsilon = 1e-10);
        assert_relative_eq!(config.platform_phase().to_degrees(), 40.0, epsilon = 1e-10);
    }

    #[test]
    fn test_nominal_lengths_filled() {
        let config = Configuration::new(Topology::EightEight, &reference_params()).unwrap();
        assert!(config.nominal_lengths().iter().all(|&n| (n - 150.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_platform_wider_than_base_is_accepted() {
        let params = reference_params().platform_radius(150.0);
        assert!(Configuration::new(Topology::SixSix, &params).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_parameter() {
        let params = reference_params().platform_radius(0.0);
        let error = Configuration::new(Topology::SixSix, &params).unwrap_err();
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_create_configuration_unknown() {
        let error = create_configuration("9-9", &reference_params()).unwrap_err();
        assert_eq!(error, PlatformError::UnknownTopology("9-9".to_string()));
    }

    #[test]
    fn test_with_limits() {
        let config = Configuration::new(Topology::SixThree, &reference_params()).unwrap();
        let narrowed = config.with_limits(LegLimits::new(150.0, 160.0)).unwrap();
        assert_relative_eq!(narrowed.limits().min, 150.0);
        assert_eq!(narrowed.anchors(), config.anchors());
        assert!(config.with_limits(LegLimits::new(10.0, 5.0)).is_err());
    }
}
