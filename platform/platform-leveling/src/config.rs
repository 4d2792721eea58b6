//! Leveling loop settings.

use platform_types::{HOME_HEIGHT, PlatformError, PlatformResult, require_positive};
use serde::{Deserialize, Serialize};

/// Which axes the planner corrects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelingMode {
    /// Correct roll and pitch; yaw is left at zero.
    #[default]
    RollPitch,
    /// Correct roll, pitch and yaw.
    Full,
}

impl LevelingMode {
    /// Lowercase name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RollPitch => "roll-pitch",
            Self::Full => "full",
        }
    }
}

/// Settings for the leveling planner.
///
/// Angles are degrees, rates are per second.
///
/// # Example
///
/// ```
/// use platform_leveling::{LevelingConfig, LevelingMode};
///
/// let config = LevelingConfig::default();
/// assert!((config.step_limit_deg() - 2.5).abs() < 1e-12);
/// assert_eq!(config.mode, LevelingMode::RollPitch);
///
/// let fast = LevelingConfig::default().with_update_rate(10.0);
/// assert!((fast.step_limit_deg() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelingConfig {
    /// Tilt below which the platform counts as level.
    pub level_threshold_deg: f64,

    /// Orientation changes at or below this are ignored.
    pub deadband_deg: f64,

    /// Planner ticks per second.
    pub update_rate_hz: f64,

    /// Largest correction rate per axis.
    pub max_correction_rate_deg_s: f64,

    /// Axes to correct.
    pub mode: LevelingMode,

    /// Platform height at which corrections are commanded, in millimetres.
    pub height: f64,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            level_threshold_deg: 2.0,
            deadband_deg: 0.5,
            update_rate_hz: 2.0,
            max_correction_rate_deg_s: 5.0,
            mode: LevelingMode::RollPitch,
            height: HOME_HEIGHT,
        }
    }
}

impl LevelingConfig {
    /// Largest per-axis change in one tick, in degrees.
    #[must_use]
    pub fn step_limit_deg(&self) -> f64 {
        self.max_correction_rate_deg_s / self.update_rate_hz
    }

    /// Seconds between ticks.
    #[must_use]
    pub fn tick_seconds(&self) -> f64 {
        self.update_rate_hz.recip()
    }

    /// Sets the correction mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: LevelingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the level threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold_deg: f64) -> Self {
        self.level_threshold_deg = threshold_deg;
        self
    }

    /// Sets the deadband.
    #[must_use]
    pub const fn with_deadband(mut self, deadband_deg: f64) -> Self {
        self.deadband_deg = deadband_deg;
        self
    }

    /// Sets the update rate.
    #[must_use]
    pub const fn with_update_rate(mut self, rate_hz: f64) -> Self {
        self.update_rate_hz = rate_hz;
        self
    }

    /// Sets the maximum correction rate.
    #[must_use]
    pub const fn with_max_rate(mut self, rate_deg_s: f64) -> Self {
        self.max_correction_rate_deg_s = rate_deg_s;
        self
    }

    /// Sets the command height.
    #[must_use]
    pub const fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Checks that thresholds, rates and height are usable.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NonPositiveParameter`] for a non-positive rate
    /// or height, or a negative threshold or deadband.
    pub fn validate(&self) -> PlatformResult<()> {
        require_positive("update_rate_hz", self.update_rate_hz)?;
        require_positive("max_correction_rate_deg_s", self.max_correction_rate_deg_s)?;
        require_positive("height", self.height)?;
        // Zero threshold and deadband are allowed: always correct.
        for (name, value) in [
            ("level_threshold_deg", self.level_threshold_deg),
            ("deadband_deg", self.deadband_deg),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PlatformError::NonPositiveParameter { name, value });
            }
        }
        Ok(())
    }
}
