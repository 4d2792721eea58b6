//! Actuator length-limit check.
//!
//! Two bands apply to every leg: the configured `[min, max]` stroke and a
//! degenerate-geometry band of `[0.5, 1.8] × nominal` that is enforced even
//! when the configured limits are wider.

use platform_types::LegLimits;

use super::ValidationParams;

/// Which bound a leg length crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthBound {
    /// Shorter than the configured minimum.
    BelowMin,
    /// Longer than the configured maximum.
    AboveMax,
    /// Shorter than the degenerate-band minimum.
    BelowDegenerate,
    /// Longer than the degenerate-band maximum.
    AboveDegenerate,
}

impl LengthBound {
    /// Short description for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BelowMin => "below minimum",
            Self::AboveMax => "above maximum",
            Self::BelowDegenerate => "below degenerate band",
            Self::AboveDegenerate => "above degenerate band",
        }
    }
}

/// A leg whose length is out of bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthViolation {
    /// Leg index.
    pub leg: usize,
    /// Measured length.
    pub length: f64,
    /// The bound that was crossed.
    pub bound: LengthBound,
    /// Value of that bound.
    pub limit: f64,
}

/// Checks every leg against the configured limits and the degenerate band.
///
/// At most one violation is reported per leg. The configured limit takes
/// precedence over the degenerate band.
///
/// # Example
///
/// ```
/// use platform_kinematics::{check_leg_lengths, LengthBound, ValidationParams};
/// use platform_types::LegLimits;
///
/// let violations = check_leg_lengths(
///     &[150.0, 130.0],
///     &[150.0, 150.0],
///     LegLimits::new(140.0, 220.0),
///     &ValidationParams::default(),
/// );
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].leg, 1);
/// assert_eq!(violations[0].bound, LengthBound::BelowMin);
/// ```
#[must_use]
pub fn check_leg_lengths(
    lengths: &[f64],
    nominals: &[f64],
    limits: LegLimits,
    params: &ValidationParams,
) -> Vec<LengthViolation> {
    lengths
        .iter()
        .zip(nominals)
        .enumerate()
        .filter_map(|(leg, (&length, &nominal))| {
            let degenerate_min = nominal * params.degenerate_min_factor;
            let degenerate_max = nominal * params.degenerate_max_factor;

            let (bound, limit) = if length < limits.min {
                (LengthBound::BelowMin, limits.min)
            } else if length > limits.max {
                (LengthBound::AboveMax, limits.max)
            } else if length < degenerate_min {
                (LengthBound::BelowDegenerate, degenerate_min)
            } else if length > degenerate_max {
                (LengthBound::AboveDegenerate, degenerate_max)
            } else if length.is_nan() {
                (LengthBound::AboveMax, limits.max)
            } else {
                return None;
            };

            Some(LengthViolation {
                leg,
                length,
                bound,
                limit,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> LegLimits {
        LegLimits::new(140.0, 220.0)
    }

    fn check(lengths: &[f64]) -> Vec<LengthViolation> {
        let nominal = vec![150.0; lengths.len()];
        check_leg_lengths(lengths, &nominal, limits(), &ValidationParams::default())
    }

    #[test]
    fn test_inside_limits_passes() {
        let lengths = [140.0, 174.2, 220.0];
        let violations = check(&lengths);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_below_min_names_leg() {
        let violations = check(&[150.0, 150.0, 130.0]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].leg, 2);
        assert_eq!(violations[0].bound, LengthBound::BelowMin);
        assert!((violations[0].length - 130.0).abs() < f64::EPSILON);
        assert!((violations[0].limit - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_above_max() {
        let violations = check(&[221.0]);
        assert_eq!(violations[0].bound, LengthBound::AboveMax);
    }

    #[test]
    fn test_degenerate_band_enforced_under_wide_limits() {
        let wide = LegLimits::new(1.0, 1000.0);
        let params = ValidationParams::default();

        let short = check_leg_lengths(&[70.0], &[150.0], wide, &params);
        assert_eq!(short[0].bound, LengthBound::BelowDegenerate);
        assert!((short[0].limit - 75.0).abs() < 1e-12);

        let long = check_leg_lengths(&[280.0], &[150.0], wide, &params);
        assert_eq!(long[0].bound, LengthBound::AboveDegenerate);
        assert!((long[0].limit - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_configured_limit_reported_first() {
        // 60 is below both the configured minimum and the degenerate band.
        let violations = check(&[60.0]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].bound, LengthBound::BelowMin);
    }

    #[test]
    fn test_nan_length_fails() {
        let violations = check(&[f64::NAN]);
        assert_eq!(violations.len(), 1);
    }
}
