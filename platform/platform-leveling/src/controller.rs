//! Leveling planner.
//!
//! The planner turns a measured platform orientation into a correcting pose
//! at the command height, solves it and checks it. It never drives hardware:
//! every decision is returned to the caller, which owns the actuator policy.
//!
//! # Decision order
//!
//! 1. Measurement within the deadband of the last acted-on measurement and
//!    no correction still in progress: [`LevelingDecision::Hold`].
//! 2. Tilt below the level threshold: [`LevelingDecision::AlreadyLevel`].
//! 3. Otherwise step the commanded orientation toward the correction target,
//!    limited per axis by `max_correction_rate / update_rate`, then solve and
//!    validate. Infeasible steps are [`LevelingDecision::Rejected`].

use platform_kinematics::{IkSolution, ValidationParams, ValidationResult, solve, validate_solution};
use platform_types::{Configuration, Orientation, PlatformResult, Pose};
use tracing::{debug, info, warn};

use crate::config::{LevelingConfig, LevelingMode};

/// Orientation that cancels `measured` in the given mode.
///
/// # Example
///
/// ```
/// use platform_leveling::{correction_target, LevelingMode};
/// use platform_types::Orientation;
///
/// let measured = Orientation::from_degrees(4.0, -3.0, 10.0).unwrap();
/// let target = correction_target(&measured, LevelingMode::RollPitch);
/// assert!((target.roll_deg() + 4.0).abs() < 1e-12);
/// assert!((target.pitch_deg() - 3.0).abs() < 1e-12);
/// assert_eq!(target.yaw_deg(), 0.0);
/// ```
#[must_use]
pub fn correction_target(measured: &Orientation, mode: LevelingMode) -> Orientation {
    match mode {
        LevelingMode::RollPitch => measured.negated().without_yaw(),
        LevelingMode::Full => measured.negated(),
    }
}

/// A feasible correction ready to be sent to the actuators.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelingCommand {
    /// Commanded platform pose.
    pub pose: Pose,
    /// Solved leg lengths for `pose`.
    pub leg_lengths: Vec<f64>,
    /// Measured tilt that triggered the command, in degrees.
    pub tilt_deg: f64,
    /// Whether the rate limit cut this step short of the target.
    pub saturated: bool,
}

/// Outcome of one planner tick.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelingDecision {
    /// Tilt is under the level threshold.
    AlreadyLevel {
        /// Measured tilt in degrees.
        tilt_deg: f64,
    },
    /// Orientation change since the last action is inside the deadband.
    Hold {
        /// Change in degrees.
        change_deg: f64,
    },
    /// Send this command.
    Command(LevelingCommand),
    /// The correction solves but fails validation.
    Rejected {
        /// The pose that was tried.
        pose: Pose,
        /// Why it was rejected.
        validation: ValidationResult,
    },
}

impl LevelingDecision {
    /// The command, if this decision produced one.
    #[must_use]
    pub const fn command(&self) -> Option<&LevelingCommand> {
        match self {
            Self::Command(command) => Some(command),
            _ => None,
        }
    }

    /// Whether the correction was rejected.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Short label for logs and terminal output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AlreadyLevel { .. } => "level",
            Self::Hold { .. } => "hold",
            Self::Command(_) => "command",
            Self::Rejected { .. } => "rejected",
        }
    }
}

/// Stateful leveling planner.
///
/// # Example
///
/// ```
/// use platform_kinematics::ValidationParams;
/// use platform_leveling::{LevelingConfig, LevelingController, LevelingDecision};
/// use platform_types::{create_configuration, GeometryParams, LegLimits, Orientation};
///
/// let params = GeometryParams::default().limits(LegLimits::new(140.0, 220.0));
/// let config = create_configuration("6-3", &params).unwrap();
/// let mut controller =
///     LevelingController::new(config, LevelingConfig::default(), ValidationParams::default()).unwrap();
///
/// let tilted = Orientation::from_degrees(4.0, 0.0, 0.0).unwrap();
/// let decision = controller.update(&tilted);
/// let command = decision.command().unwrap();
///
/// // Default rate limit is 5 deg/s at 2 Hz: 2.5 degrees per tick.
/// assert!(command.saturated);
/// assert!((command.pose.orientation().roll_deg() + 2.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LevelingController {
    config: Configuration,
    settings: LevelingConfig,
    validation: ValidationParams,
    home: Pose,
    commanded: Orientation,
    last_measured: Orientation,
    converging: bool,
}

impl LevelingController {
    /// Creates a planner commanding level at `settings.height`.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` or `validation` are invalid.
    pub fn new(
        config: Configuration,
        settings: LevelingConfig,
        validation: ValidationParams,
    ) -> PlatformResult<Self> {
        settings.validate()?;
        validation.validate()?;
        let home = Pose::new(0.0, 0.0, settings.height, 0.0, 0.0, 0.0)?;
        debug!(
            topology = %config.topology(),
            mode = settings.mode.as_str(),
            step_limit_deg = settings.step_limit_deg(),
            "Created leveling controller"
        );
        Ok(Self {
            config,
            settings,
            validation,
            home,
            commanded: Orientation::level(),
            last_measured: Orientation::level(),
            converging: false,
        })
    }

    /// Platform being leveled.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Loop settings.
    #[must_use]
    pub const fn settings(&self) -> &LevelingConfig {
        &self.settings
    }

    /// Orientation most recently commanded.
    #[must_use]
    pub const fn commanded(&self) -> Orientation {
        self.commanded
    }

    /// Whether the last command stopped short of its target.
    #[must_use]
    pub const fn is_converging(&self) -> bool {
        self.converging
    }

    /// Forgets all history and returns to a level command.
    pub fn reset(&mut self) {
        self.commanded = Orientation::level();
        self.last_measured = Orientation::level();
        self.converging = false;
    }

    /// Runs one planner tick for a new measurement.
    pub fn update(&mut self, measured: &Orientation) -> LevelingDecision {
        let change_deg = measured.distance_deg(&self.last_measured);
        if !self.converging && change_deg <= self.settings.deadband_deg {
            debug!(change_deg, "Leveling hold");
            return LevelingDecision::Hold { change_deg };
        }

        let tilt_deg = measured.tilt_deg();
        if tilt_deg < self.settings.level_threshold_deg {
            self.converging = false;
            debug!(tilt_deg, "Platform already level");
            return LevelingDecision::AlreadyLevel { tilt_deg };
        }

        let target = correction_target(measured, self.settings.mode);
        let (next, saturated) = self
            .commanded
            .step_towards(&target, self.settings.step_limit_deg().to_radians());
        let pose = self.home.with_orientation(next);
        let (solution, validation) = self.evaluate(&pose);

        // Acting on a measurement consumes it, feasible or not.
        self.last_measured = *measured;

        if !validation.is_valid() {
            self.converging = false;
            warn!(
                tilt_deg,
                roll_deg = next.roll_deg(),
                pitch_deg = next.pitch_deg(),
                reason = %validation.summary(),
                "Leveling correction rejected"
            );
            return LevelingDecision::Rejected { pose, validation };
        }

        self.commanded = next;
        self.converging = saturated;
        info!(
            tilt_deg,
            roll_deg = next.roll_deg(),
            pitch_deg = next.pitch_deg(),
            yaw_deg = next.yaw_deg(),
            saturated,
            "Leveling command"
        );
        LevelingDecision::Command(LevelingCommand {
            pose,
            leg_lengths: solution.leg_lengths(),
            tilt_deg,
            saturated,
        })
    }

    /// One-shot correction for `measured`, ignoring history and rate limits.
    ///
    /// Never returns [`LevelingDecision::Hold`].
    #[must_use]
    pub fn plan(&self, measured: &Orientation) -> LevelingDecision {
        let tilt_deg = measured.tilt_deg();
        if tilt_deg < self.settings.level_threshold_deg {
            return LevelingDecision::AlreadyLevel { tilt_deg };
        }
        let pose = self
            .home
            .with_orientation(correction_target(measured, self.settings.mode));
        let (solution, validation) = self.evaluate(&pose);
        if validation.is_valid() {
            LevelingDecision::Command(LevelingCommand {
                pose,
                leg_lengths: solution.leg_lengths(),
                tilt_deg,
                saturated: false,
            })
        } else {
            LevelingDecision::Rejected { pose, validation }
        }
    }

    fn evaluate(&self, pose: &Pose) -> (IkSolution, ValidationResult) {
        let solution = solve(&self.config, pose);
        let validation = validate_solution(&self.config, &solution, &self.validation);
        (solution, validation)
    }
}
