//! Error types for platform configuration and pose handling.
//!
//! Only malformed input is an error here. A pose that is kinematically
//! solvable but physically infeasible is reported through a validation
//! result, never through [`PlatformError`].

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Errors that can occur while building a configuration or accepting a pose.
///
/// # Example
///
/// ```
/// use platform_types::PlatformError;
///
/// let error = PlatformError::UnknownTopology("5-5".to_string());
/// assert!(error.is_configuration_error());
/// assert!(error.to_string().contains("5-5"));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PlatformError {
    /// The topology id is not one of the supported layouts.
    #[error("unknown topology '{0}'")]
    UnknownTopology(String),

    /// A geometric parameter must be strictly positive and finite.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A parameter that may be zero or negative was not finite.
    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The leg length limits are inverted.
    #[error("invalid leg limits: min {min} exceeds max {max}")]
    InvalidLimits {
        /// Configured minimum leg length.
        min: f64,
        /// Configured maximum leg length.
        max: f64,
    },

    /// The angle warning threshold lies above the cutoff.
    #[error("invalid angle thresholds: warning {warning}° exceeds cutoff {cutoff}°")]
    InvalidAngleThresholds {
        /// Near-singular warning angle, degrees.
        warning: f64,
        /// Unreachable cutoff angle, degrees.
        cutoff: f64,
    },

    /// A pose component is NaN or infinite.
    #[error("pose component {component} is not finite ({value})")]
    NonFinitePose {
        /// Which component was rejected (`x`, `roll`, ...).
        component: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Input slices disagree with the configuration they are checked against.
    #[error("expected {expected} {what}, got {actual}")]
    MismatchedInput {
        /// What was being counted (for example `leg lengths`).
        what: &'static str,
        /// Count required by the configuration.
        expected: usize,
        /// Count actually supplied.
        actual: usize,
    },

    /// A sampling box has a lower corner above its upper corner.
    #[error("invalid bounds on {axis}: min {min} exceeds max {max}")]
    InvalidBounds {
        /// Axis name (`x`, `y` or `z`).
        axis: &'static str,
        /// Lower corner coordinate.
        min: f64,
        /// Upper corner coordinate.
        max: f64,
    },

    /// A workspace sweep would exceed the configured point budget.
    #[error("workspace grid has {points} points, limit is {limit}")]
    GridTooLarge {
        /// Number of grid points the sweep would evaluate.
        points: usize,
        /// Configured maximum.
        limit: usize,
    },
}

impl PlatformError {
    /// Returns `true` for errors raised while building a configuration.
    ///
    /// These are fatal for the configuration being built and must be
    /// surfaced to the caller.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTopology(_)
                | Self::NonPositiveParameter { .. }
                | Self::NonFiniteParameter { .. }
                | Self::InvalidLimits { .. }
                | Self::InvalidAngleThresholds { .. }
        )
    }

    /// Returns `true` if a pose was rejected at the boundary.
    #[must_use]
    pub const fn is_invalid_pose(&self) -> bool {
        matches!(self, Self::NonFinitePose { .. })
    }
}

/// Checks that `value` is strictly positive and finite.
///
/// # Errors
///
/// Returns [`PlatformError::NonPositiveParameter`] otherwise.
pub fn require_positive(name: &'static str, value: f64) -> PlatformResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlatformError::NonPositiveParameter { name, value })
    }
}

/// Checks that `value` is finite.
///
/// # Errors
///
/// Returns [`PlatformError::NonFiniteParameter`] otherwise.
pub fn require_finite(name: &'static str, value: f64) -> PlatformResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlatformError::NonFiniteParameter { name, value })
    }
}
