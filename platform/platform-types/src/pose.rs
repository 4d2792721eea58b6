//! Platform pose: translation plus roll/pitch/yaw orientation.
//!
//! Angles enter in degrees and are stored in radians. Every constructor
//! rejects NaN and infinite components, so a [`Pose`] that exists is safe to
//! hand to the solver.

use nalgebra::Vector3;

use crate::error::{PlatformError, PlatformResult};

/// Height of the home pose above the base plane, in millimetres.
pub const HOME_HEIGHT: f64 = 160.0;

/// Roll, pitch and yaw of the platform, stored in radians.
///
/// Roll rotates about X, pitch about Y, yaw about Z.
///
/// # Example
///
/// ```
/// use platform_types::Orientation;
///
/// let orientation = Orientation::from_degrees(10.0, -5.0, 0.0).unwrap();
/// assert!((orientation.roll() - 10f64.to_radians()).abs() < 1e-12);
/// assert!((orientation.roll_deg() - 10.0).abs() < 1e-12);
///
/// assert!(Orientation::from_degrees(f64::NAN, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    roll: f64,
    pitch: f64,
    yaw: f64,
}

impl Orientation {
    /// A level orientation (all angles zero).
    #[must_use]
    pub const fn level() -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
        }
    }

    /// Creates an orientation from angles in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NonFinitePose`] for a non-finite angle.
    pub fn from_degrees(roll: f64, pitch: f64, yaw: f64) -> PlatformResult<Self> {
        check_finite(&[("roll", roll), ("pitch", pitch), ("yaw", yaw)])?;
        Ok(Self {
            roll: roll.to_radians(),
            pitch: pitch.to_radians(),
            yaw: yaw.to_radians(),
        })
    }

    /// Creates an orientation from angles in radians.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NonFinitePose`] for a non-finite angle.
    pub fn from_radians(roll: f64, pitch: f64, yaw: f64) -> PlatformResult<Self> {
        check_finite(&[("roll", roll), ("pitch", pitch), ("yaw", yaw)])?;
        Ok(Self { roll, pitch, yaw })
    }

    /// Roll in radians.
    #[must_use]
    pub const fn roll(&self) -> f64 {
        self.roll
    }

    /// Pitch in radians.
    #[must_use]
    pub const fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Yaw in radians.
    #[must_use]
    pub const fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Roll in degrees.
    #[must_use]
    pub fn roll_deg(&self) -> f64 {
        self.roll.to_degrees()
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch_deg(&self) -> f64 {
        self.pitch.to_degrees()
    }

    /// Yaw in degrees.
    #[must_use]
    pub fn yaw_deg(&self) -> f64 {
        self.yaw.to_degrees()
    }

    /// `[roll, pitch, yaw]` in degrees.
    #[must_use]
    pub fn to_degrees(&self) -> [f64; 3] {
        [self.roll_deg(), self.pitch_deg(), self.yaw_deg()]
    }

    /// Tilt away from level, `sqrt(roll² + pitch²)`, in degrees.
    #[must_use]
    pub fn tilt_deg(&self) -> f64 {
        self.roll_deg().hypot(self.pitch_deg())
    }

    /// The orientation that undoes this one axis by axis.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            roll: -self.roll,
            pitch: -self.pitch,
            yaw: -self.yaw,
        }
    }

    /// The same orientation with yaw forced to zero.
    #[must_use]
    pub const fn without_yaw(&self) -> Self {
        Self {
            roll: self.roll,
            pitch: self.pitch,
            yaw: 0.0,
        }
    }

    /// Euclidean distance between the two angle triples, in degrees.
    #[must_use]
    pub fn distance_deg(&self, other: &Self) -> f64 {
        let [r0, p0, y0] = self.to_degrees();
        let [r1, p1, y1] = other.to_degrees();
        (r1 - r0).hypot(p1 - p0).hypot(y1 - y0)
    }

    /// Moves toward `target` by at most `max_step` radians per axis.
    ///
    /// Returns the new orientation and whether any axis was limited.
    ///
    /// # Example
    ///
    /// ```
    /// use platform_types::Orientation;
    ///
    /// let target = Orientation::from_degrees(-6.0, 1.0, 0.0).unwrap();
    /// let (next, limited) = Orientation::level().step_towards(&target, 2.5_f64.to_radians());
    /// assert!(limited);
    /// assert!((next.roll_deg() + 2.5).abs() < 1e-9);
    /// assert!((next.pitch_deg() - 1.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn step_towards(&self, target: &Self, max_step: f64) -> (Self, bool) {
        let step = |from: f64, to: f64| {
            let delta = to - from;
            if delta.abs() > max_step {
                (from + max_step.copysign(delta), true)
            } else {
                (to, false)
            }
        };
        let (roll, roll_limited) = step(self.roll, target.roll);
        let (pitch, pitch_limited) = step(self.pitch, target.pitch);
        let (yaw, yaw_limited) = step(self.yaw, target.yaw);
        (
            Self { roll, pitch, yaw },
            roll_limited || pitch_limited || yaw_limited,
        )
    }

    /// Exact bit pattern of the three angles.
    ///
    /// Two orientations with equal keys produce bit-identical rotations.
    #[must_use]
    pub const fn key(&self) -> [u64; 3] {
        [self.roll.to_bits(), self.pitch.to_bits(), self.yaw.to_bits()]
    }
}

/// Desired platform pose.
///
/// # Example
///
/// ```
/// use platform_types::Pose;
///
/// let home = Pose::home();
/// assert!((home.z() - 160.0).abs() < 1e-12);
///
/// let pose = Pose::new(5.0, 0.0, 170.0, 3.0, -2.0, 0.0).unwrap();
/// assert!((pose.orientation().pitch_deg() + 2.0).abs() < 1e-12);
///
/// assert!(Pose::new(f64::INFINITY, 0.0, 160.0, 0.0, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    translation: Vector3<f64>,
    orientation: Orientation,
}

impl Pose {
    /// Creates a pose from millimetres and degrees.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NonFinitePose`] naming the first non-finite
    /// component.
    pub fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> PlatformResult<Self> {
        check_finite(&[("x", x), ("y", y), ("z", z)])?;
        Ok(Self {
            translation: Vector3::new(x, y, z),
            orientation: Orientation::from_degrees(roll, pitch, yaw)?,
        })
    }

    /// Creates a pose from a translation and an already validated orientation.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NonFinitePose`] if the translation is not finite.
    pub fn from_parts(translation: Vector3<f64>, orientation: Orientation) -> PlatformResult<Self> {
        check_finite(&[
            ("x", translation.x),
            ("y", translation.y),
            ("z", translation.z),
        ])?;
        Ok(Self {
            translation,
            orientation,
        })
    }

    /// The default home pose: centred, level, [`HOME_HEIGHT`] above the base.
    #[must_use]
    pub fn home() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, HOME_HEIGHT),
            orientation: Orientation::level(),
        }
    }

    /// Translation in millimetres.
    #[must_use]
    pub const fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }

    /// Orientation.
    #[must_use]
    pub const fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    /// X translation.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.translation.x
    }

    /// Y translation.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.translation.y
    }

    /// Z translation (platform height).
    #[must_use]
    pub fn z(&self) -> f64 {
        self.translation.z
    }

    /// Returns this pose with a different orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::home()
    }
}

fn check_finite(components: &[(&'static str, f64)]) -> PlatformResult<()> {
    match components.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(component, value)) => Err(PlatformError::NonFinitePose { component, value }),
        None => Ok(()),
    }
}
