//! Pose producers.
//!
//! A [`PoseSource`] yields the poses an animation, a test script or a sensor
//! bridge wants evaluated. Consumers feed each pose to
//! [`solve`](platform_kinematics::solve) exactly as they would a single
//! request; sources know nothing about the solver.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use nalgebra::Vector3;
use platform_kinematics::standard_cases;
use platform_types::{
    HOME_HEIGHT, Orientation, PlatformResult, Pose, require_finite, require_positive,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Something that produces poses one at a time.
pub trait PoseSource {
    /// The next pose, or `None` when the source is exhausted.
    fn next_pose(&mut self) -> Option<Pose>;

    /// Takes up to `count` poses.
    fn take_poses(&mut self, count: usize) -> Vec<Pose>
    where
        Self: Sized,
    {
        std::iter::from_fn(|| self.next_pose()).take(count).collect()
    }
}

/// One sinusoidal channel: `amplitude · sin(2π · frequency · t + phase)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sinusoid {
    /// Peak offset (millimetres or degrees).
    pub amplitude: f64,
    /// Cycles per second.
    pub frequency_hz: f64,
    /// Phase in radians.
    pub phase: f64,
}

impl Sinusoid {
    /// Creates a channel.
    #[must_use]
    pub const fn new(amplitude: f64, frequency_hz: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency_hz,
            phase,
        }
    }

    /// Value at time `t` seconds.
    #[must_use]
    pub fn at(&self, t: f64) -> f64 {
        self.amplitude * (TAU * self.frequency_hz * t + self.phase).sin()
    }

    fn validate(&self, name: &'static str) -> PlatformResult<()> {
        require_finite(name, self.amplitude)?;
        require_finite(name, self.frequency_hz)?;
        require_finite(name, self.phase)?;
        Ok(())
    }
}

/// Per-axis motion for [`SinusoidalPoseSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinusoidalMotion {
    /// X translation channel.
    pub x: Sinusoid,
    /// Y translation channel.
    pub y: Sinusoid,
    /// Z translation channel.
    pub z: Sinusoid,
    /// Roll channel, degrees.
    pub roll: Sinusoid,
    /// Pitch channel, degrees.
    pub pitch: Sinusoid,
    /// Yaw channel, degrees.
    pub yaw: Sinusoid,
}

impl Default for SinusoidalMotion {
    /// A gentle wobble: 8° roll and pitch a quarter cycle apart at 0.25 Hz,
    /// with 5 mm heave at 0.5 Hz.
    fn default() -> Self {
        Self {
            x: Sinusoid::default(),
            y: Sinusoid::default(),
            z: Sinusoid::new(5.0, 0.5, 0.0),
            roll: Sinusoid::new(8.0, 0.25, 0.0),
            pitch: Sinusoid::new(8.0, 0.25, TAU / 4.0),
            yaw: Sinusoid::default(),
        }
    }
}

/// Endless sinusoidal motion around a center pose.
///
/// # Example
///
/// ```
/// use platform_leveling::{PoseSource, SinusoidalMotion, SinusoidalPoseSource};
///
/// let mut source = SinusoidalPoseSource::new(SinusoidalMotion::default(), 0.05).unwrap();
/// let first = source.next_pose().unwrap();
/// assert!((first.z() - 160.0).abs() < 1e-12);
/// assert_eq!(source.take_poses(10).len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct SinusoidalPoseSource {
    motion: SinusoidalMotion,
    center: Vector3<f64>,
    dt: f64,
    tick: u64,
}

impl SinusoidalPoseSource {
    /// Creates a source around the home pose sampled every `dt` seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` is not positive or a channel is not finite.
    pub fn new(motion: SinusoidalMotion, dt: f64) -> PlatformResult<Self> {
        Self::with_center(motion, Vector3::new(0.0, 0.0, HOME_HEIGHT), dt)
    }

    /// Creates a source around an arbitrary center translation.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` is not positive, or `center` or a channel is
    /// not finite.
    pub fn with_center(
        motion: SinusoidalMotion,
        center: Vector3<f64>,
        dt: f64,
    ) -> PlatformResult<Self> {
        require_positive("dt", dt)?;
        for (name, value) in [
            ("center.x", center.x),
            ("center.y", center.y),
            ("center.z", center.z),
        ] {
            require_finite(name, value)?;
        }
        motion.x.validate("x")?;
        motion.y.validate("y")?;
        motion.z.validate("z")?;
        motion.roll.validate("roll")?;
        motion.pitch.validate("pitch")?;
        motion.yaw.validate("yaw")?;
        Ok(Self {
            motion,
            center,
            dt,
            tick: 0,
        })
    }

    /// Time of the next pose, in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time(&self) -> f64 {
        self.tick as f64 * self.dt
    }

    /// Pose at an arbitrary time.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NonFinitePose`](platform_types::PlatformError::NonFinitePose)
    /// if `t` is so large the result overflows.
    pub fn pose_at(&self, t: f64) -> PlatformResult<Pose> {
        let m = &self.motion;
        let translation = self.center + Vector3::new(m.x.at(t), m.y.at(t), m.z.at(t));
        let orientation = Orientation::from_degrees(m.roll.at(t), m.pitch.at(t), m.yaw.at(t))?;
        Pose::from_parts(translation, orientation)
    }

    /// Restarts at `t = 0`.
    pub fn rewind(&mut self) {
        self.tick = 0;
    }
}

impl PoseSource for SinusoidalPoseSource {
    /// Ends the stream once a channel overflows.
    fn next_pose(&mut self) -> Option<Pose> {
        let t = self.time();
        match self.pose_at(t) {
            Ok(pose) => {
                self.tick += 1;
                Some(pose)
            }
            Err(err) => {
                warn!(t, error = %err, "Sinusoidal pose overflowed, ending stream");
                None
            }
        }
    }
}

/// A fixed sequence of poses with optional labels.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPoseSource {
    steps: VecDeque<(String, Pose)>,
}

impl ScriptedPoseSource {
    /// Creates a source from unlabelled poses.
    #[must_use]
    pub fn new(poses: impl IntoIterator<Item = Pose>) -> Self {
        Self {
            steps: poses.into_iter().map(|pose| (String::new(), pose)).collect(),
        }
    }

    /// The standard comparison tilts at `height`, labelled.
    ///
    /// # Errors
    ///
    /// Returns an error if `height` is not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use platform_leveling::ScriptedPoseSource;
    ///
    /// let source = ScriptedPoseSource::comparison_sweep(160.0).unwrap();
    /// assert_eq!(source.len(), 10);
    /// assert_eq!(source.peek_label(), Some("Level"));
    /// ```
    pub fn comparison_sweep(height: f64) -> PlatformResult<Self> {
        let steps = standard_cases(height)?
            .into_iter()
            .map(|case| (case.label, case.pose))
            .collect();
        Ok(Self { steps })
    }

    /// Appends a labelled pose.
    #[must_use]
    pub fn then(mut self, label: impl Into<String>, pose: Pose) -> Self {
        self.steps.push_back((label.into(), pose));
        self
    }

    /// Poses remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Label of the next pose.
    #[must_use]
    pub fn peek_label(&self) -> Option<&str> {
        self.steps.front().map(|(label, _)| label.as_str())
    }

    /// Next pose together with its label.
    pub fn next_labelled(&mut self) -> Option<(String, Pose)> {
        self.steps.pop_front()
    }
}

impl PoseSource for ScriptedPoseSource {
    fn next_pose(&mut self) -> Option<Pose> {
        self.next_labelled().map(|(_, pose)| pose)
    }
}
