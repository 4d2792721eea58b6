//! Presentational compressive-force proxy.
//!
//! The ratio of actual to nominal leg length is bucketed into three bands
//! for colouring legs. This is not a statics solve.

use platform_types::{PlatformError, PlatformResult, require_positive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ratio at or above which a leg is in the moderate band.
pub const MODERATE_RATIO: f64 = 1.0;

/// Ratio above which a leg is in the high band.
pub const HIGH_RATIO: f64 = 1.2;

/// Force class of one leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ForceBand {
    /// Ratio below 1.0.
    Normal,
    /// Ratio in `[1.0, 1.2]`.
    Moderate,
    /// Ratio above 1.2.
    High,
}

impl ForceBand {
    /// Band for a length ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > HIGH_RATIO {
            Self::High
        } else if ratio >= MODERATE_RATIO {
            Self::Moderate
        } else {
            Self::Normal
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Force proxy for one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForceEstimate {
    /// Actual length divided by nominal length.
    pub ratio: f64,
    /// Band of `ratio`.
    pub band: ForceBand,
}

/// Force proxy for a single leg.
#[must_use]
pub fn estimate_force(length: f64, nominal: f64) -> ForceEstimate {
    let ratio = length / nominal;
    ForceEstimate {
        ratio,
        band: ForceBand::from_ratio(ratio),
    }
}

/// Force proxy for every leg.
///
/// # Errors
///
/// Returns [`PlatformError::MismatchedInput`] if the slices differ in length,
/// or [`PlatformError::NonPositiveParameter`] for a non-positive nominal length.
///
/// # Example
///
/// ```
/// use platform_kinematics::{estimate_forces, ForceBand};
///
/// let forces = estimate_forces(&[140.0, 160.0, 190.0], &[150.0; 3]).unwrap();
/// let bands: Vec<_> = forces.iter().map(|f| f.band).collect();
/// assert_eq!(bands, [ForceBand::Normal, ForceBand::Moderate, ForceBand::High]);
/// ```
pub fn estimate_forces(
    leg_lengths: &[f64],
    nominal_lengths: &[f64],
) -> PlatformResult<Vec<ForceEstimate>> {
    if leg_lengths.len() != nominal_lengths.len() {
        return Err(PlatformError::MismatchedInput {
            what: "nominal lengths",
            expected: leg_lengths.len(),
            actual: nominal_lengths.len(),
        });
    }

    leg_lengths
        .iter()
        .zip(nominal_lengths)
        .map(|(&length, &nominal)| {
            require_positive("nominal_length", nominal)?;
            Ok(estimate_force(length, nominal))
        })
        .collect()
}
