//! Geometry parameters for building a platform configuration.
//!
//! All lengths are millimetres. Angles at this boundary are degrees.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, PlatformResult, require_finite, require_positive};

/// Allowed actuator length range, in millimetres.
///
/// # Example
///
/// ```
/// use platform_types::LegLimits;
///
/// let limits = LegLimits::new(140.0, 220.0);
/// assert!(limits.contains(180.0));
/// assert!(!limits.contains(130.0));
/// assert!((limits.stroke() - 80.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegLimits {
    /// Shortest allowed leg length.
    pub min: f64,
    /// Longest allowed leg length.
    pub max: f64,
}

impl LegLimits {
    /// Creates a new limit range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `length` lies in `[min, max]`.
    #[must_use]
    pub fn contains(&self, length: f64) -> bool {
        (self.min..=self.max).contains(&length)
    }

    /// Usable actuator stroke (`max - min`).
    #[must_use]
    pub fn stroke(&self) -> f64 {
        self.max - self.min
    }

    /// Checks that both limits are positive and ordered.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either limit is not positive and
    /// finite, or if `min > max`.
    pub fn validate(&self) -> PlatformResult<()> {
        require_positive("min_leg_length", self.min)?;
        require_positive("max_leg_length", self.max)?;
        if self.min > self.max {
            return Err(PlatformError::InvalidLimits {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for LegLimits {
    fn default() -> Self {
        Self {
            min: 100.0,
            max: 200.0,
        }
    }
}

/// Geometric parameters shared by every topology.
///
/// The platform phase is not a free parameter: it is the base phase plus
/// the topology's fixed offset.
///
/// # Example
///
/// ```
/// use platform_types::{GeometryParams, LegLimits};
///
/// let params = GeometryParams::default()
///     .base_radius(120.0)
///     .platform_radius(70.0)
///     .nominal_leg_length(150.0)
///     .limits(LegLimits::new(140.0, 220.0));
///
/// assert!(params.validate().is_ok());
/// assert!(!params.platform_wider_than_base());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeometryParams {
    /// Radius of the base anchor circle.
    pub base_radius: f64,

    /// Radius of the platform joint circle.
    pub platform_radius: f64,

    /// Angle of base anchor 0 from the +X axis, in degrees.
    pub base_phase_deg: f64,

    /// Leg length at the neutral pose.
    pub nominal_leg_length: f64,

    /// Actuator length limits.
    pub limits: LegLimits,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            base_radius: 120.0,
            platform_radius: 70.0,
            base_phase_deg: 0.0,
            nominal_leg_length: 150.0,
            limits: LegLimits::default(),
        }
    }
}

impl GeometryParams {
    /// Set the base radius.
    #[must_use]
    pub const fn base_radius(mut self, radius: f64) -> Self {
        self.base_radius = radius;
        self
    }

    /// Set the platform radius.
    #[must_use]
    pub const fn platform_radius(mut self, radius: f64) -> Self {
        self.platform_radius = radius;
        self
    }

    /// Set the base phase, in degrees.
    #[must_use]
    pub const fn base_phase_deg(mut self, phase: f64) -> Self {
        self.base_phase_deg = phase;
        self
    }

    /// Set the nominal leg length.
    #[must_use]
    pub const fn nominal_leg_length(mut self, length: f64) -> Self {
        self.nominal_leg_length = length;
        self
    }

    /// Set the actuator length limits.
    #[must_use]
    pub const fn limits(mut self, limits: LegLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns `true` when the platform circle is at least as wide as the base.
    ///
    /// This is legal geometry but usually a mistake, so callers are warned
    /// rather than refused.
    #[must_use]
    pub fn platform_wider_than_base(&self) -> bool {
        self.platform_radius >= self.base_radius
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a non-positive radius, nominal
    /// length or limit, a non-finite phase, or inverted limits.
    pub fn validate(&self) -> PlatformResult<()> {
        require_positive("base_radius", self.base_radius)?;
        require_positive("platform_radius", self.platform_radius)?;
        require_positive("nominal_leg_length", self.nominal_leg_length)?;
        require_finite("base_phase_deg", self.base_phase_deg)?;
        self.limits.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = GeometryParams::default();
        assert!((params.base_radius - 120.0).abs() < f64::EPSILON);
        assert!((params.platform_radius - 70.0).abs() < f64::EPSILON);
        assert!((params.nominal_leg_length - 150.0).abs() < f64::EPSILON);
        assert!((params.limits.min - 100.0).abs() < f64::EPSILON);
        assert!((params.limits.max - 200.0).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let params = GeometryParams::default()
            .base_radius(200.0)
            .platform_radius(90.0)
            .base_phase_deg(15.0)
            .nominal_leg_length(250.0);

        assert!((params.base_radius - 200.0).abs() < f64::EPSILON);
        assert!((params.platform_radius - 90.0).abs() < f64::EPSILON);
        assert!((params.base_phase_deg - 15.0).abs() < f64::EPSILON);
        assert!((params.nominal_leg_length - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_non_positive() {
        let params = GeometryParams::default().base_radius(0.0);
        assert!(matches!(
            params.validate(),
            Err(PlatformError::NonPositiveParameter {
                name: "base_radius",
                ..
            })
        ));

        let params = GeometryParams::default().nominal_leg_length(-5.0);
        assert!(params.validate().is_err());

        let params = GeometryParams::default().platform_radius(f64::NAN);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_phase() {
        let params = GeometryParams::default().base_phase_deg(f64::INFINITY);
        assert!(matches!(
            params.validate(),
            Err(PlatformError::NonFiniteParameter { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let params = GeometryParams::default().limits(LegLimits::new(220.0, 140.0));
        assert!(matches!(
            params.validate(),
            Err(PlatformError::InvalidLimits { .. })
        ));
    }

    #[test]
    fn test_platform_wider_than_base() {
        let params = GeometryParams::default().platform_radius(130.0);
        assert!(params.platform_wider_than_base());
        // Still a valid configuration, only a warning.
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_limits_contains_is_inclusive() {
        let limits = LegLimits::new(140.0, 220.0);
        assert!(limits.contains(140.0));
        assert!(limits.contains(220.0));
        assert!(!limits.contains(220.000_001));
    }
}
