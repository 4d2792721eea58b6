//! Validation thresholds.

use platform_types::{PlatformError, PlatformResult, require_positive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thresholds and switches for the validation checks.
///
/// Lengths are millimetres, angles degrees. Every check can be disabled
/// individually; a disabled check always passes.
///
/// # Example
///
/// ```
/// use platform_kinematics::ValidationParams;
///
/// let params = ValidationParams::default().with_angle_thresholds(60.0, 65.0);
/// assert!((params.angle_cutoff_deg - 65.0).abs() < f64::EPSILON);
/// assert!(params.check_collisions);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidationParams {
    /// Minimum distance between any two platform joints or base anchors.
    pub min_spacing: f64,

    /// Leg angle from vertical above which a near-singular warning is raised.
    pub angle_warning_deg: f64,

    /// Leg angle from vertical above which the pose is unreachable.
    pub angle_cutoff_deg: f64,

    /// Leg segments closer than this are reported as colliding.
    pub collision_distance: f64,

    /// Lower bound of the degenerate-geometry band, as a fraction of nominal.
    pub degenerate_min_factor: f64,

    /// Upper bound of the degenerate-geometry band, as a fraction of nominal.
    pub degenerate_max_factor: f64,

    /// Run the length-limit check.
    pub check_lengths: bool,

    /// Run the spacing check.
    pub check_spacing: bool,

    /// Run the joint-angle check.
    pub check_angles: bool,

    /// Run the leg-collision check.
    pub check_collisions: bool,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            min_spacing: 20.0,
            angle_warning_deg: 70.0,
            angle_cutoff_deg: 75.0,
            collision_distance: 20.0,
            degenerate_min_factor: 0.5,
            degenerate_max_factor: 1.8,
            check_lengths: true,
            check_spacing: true,
            check_angles: true,
            check_collisions: true,
        }
    }
}

impl ValidationParams {
    /// Only the checks that decide workspace reachability: lengths and angles.
    #[must_use]
    pub fn reachability() -> Self {
        Self {
            check_spacing: false,
            check_collisions: false,
            ..Self::default()
        }
    }

    /// Sets the minimum spacing.
    #[must_use]
    pub const fn with_min_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Sets the warning and cutoff angles.
    #[must_use]
    pub const fn with_angle_thresholds(mut self, warning_deg: f64, cutoff_deg: f64) -> Self {
        self.angle_warning_deg = warning_deg;
        self.angle_cutoff_deg = cutoff_deg;
        self
    }

    /// Sets the collision distance.
    #[must_use]
    pub const fn with_collision_distance(mut self, distance: f64) -> Self {
        self.collision_distance = distance;
        self
    }

    /// Sets the degenerate band factors.
    #[must_use]
    pub const fn with_degenerate_band(mut self, min_factor: f64, max_factor: f64) -> Self {
        self.degenerate_min_factor = min_factor;
        self.degenerate_max_factor = max_factor;
        self
    }

    /// Enables or disables the collision check.
    #[must_use]
    pub const fn with_collisions(mut self, enabled: bool) -> Self {
        self.check_collisions = enabled;
        self
    }

    /// Checks that every threshold is positive and the angles are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NonPositiveParameter`] for a non-positive or
    /// non-finite threshold, or [`PlatformError::InvalidAngleThresholds`]
    /// when the warning angle lies above the cutoff.
    pub fn validate(&self) -> PlatformResult<()> {
        require_positive("min_spacing", self.min_spacing)?;
        require_positive("angle_warning_deg", self.angle_warning_deg)?;
        require_positive("angle_cutoff_deg", self.angle_cutoff_deg)?;
        require_positive("collision_distance", self.collision_distance)?;
        require_positive("degenerate_min_factor", self.degenerate_min_factor)?;
        require_positive("degenerate_max_factor", self.degenerate_max_factor)?;
        if self.angle_warning_deg > self.angle_cutoff_deg {
            return Err(PlatformError::InvalidAngleThresholds {
                warning: self.angle_warning_deg,
                cutoff: self.angle_cutoff_deg,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ValidationParams::default();
        assert!((params.min_spacing - 20.0).abs() < f64::EPSILON);
        assert!((params.angle_warning_deg - 70.0).abs() < f64::EPSILON);
        assert!((params.angle_cutoff_deg - 75.0).abs() < f64::EPSILON);
        assert!(params.check_lengths && params.check_spacing);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_reachability_preset() {
        let params = ValidationParams::reachability();
        assert!(params.check_lengths && params.check_angles);
        assert!(!params.check_spacing && !params.check_collisions);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ValidationParams::default().with_min_spacing(0.0).validate().is_err());
        assert!(matches!(
            ValidationParams::default()
                .with_angle_thresholds(80.0, 75.0)
                .validate(),
            Err(PlatformError::InvalidAngleThresholds { warning, cutoff }) if warning > cutoff
        ));
        assert!(
            ValidationParams::default()
                .with_angle_thresholds(75.0, 75.0)
                .validate()
                .is_ok()
        );
        assert!(
            ValidationParams::default()
                .with_degenerate_band(f64::NAN, 1.8)
                .validate()
                .is_err()
        );
    }
}
