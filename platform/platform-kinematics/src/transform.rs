//! Rigid transform from the platform frame to the base frame.
//!
//! The rotation is always composed as `R = Rz(yaw) · Ry(pitch) · Rx(roll)`:
//! roll is applied first, then pitch, then yaw, all about fixed axes. A world
//! point is `R · local + t`. Other crates and front ends depend on this exact
//! order, so it is spelled out matrix by matrix rather than delegated to a
//! generic Euler-angle helper.

use nalgebra::{Matrix3, Point3, Vector3};
use platform_types::{Orientation, Pose};

/// Rotation about X by `roll` radians.
#[must_use]
pub fn rotation_x(roll: f64) -> Matrix3<f64> {
    let (s, c) = roll.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
}

/// Rotation about Y by `pitch` radians.
#[must_use]
pub fn rotation_y(pitch: f64) -> Matrix3<f64> {
    let (s, c) = pitch.sin_cos();
    Matrix3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
}

/// Rotation about Z by `yaw` radians.
#[must_use]
pub fn rotation_z(yaw: f64) -> Matrix3<f64> {
    let (s, c) = yaw.sin_cos();
    Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Composed rotation `Rz(yaw) · Ry(pitch) · Rx(roll)`.
///
/// # Example
///
/// ```
/// use platform_kinematics::rotation_matrix;
/// use platform_types::Orientation;
///
/// let r = rotation_matrix(&Orientation::from_degrees(10.0, 20.0, 30.0).unwrap());
/// let should_be_identity = r.transpose() * r;
/// assert!((should_be_identity - nalgebra::Matrix3::identity()).norm() < 1e-12);
/// ```
#[must_use]
pub fn rotation_matrix(orientation: &Orientation) -> Matrix3<f64> {
    rotation_z(orientation.yaw()) * rotation_y(orientation.pitch()) * rotation_x(orientation.roll())
}

/// Platform-to-base transform for one pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTransform {
    rotation: Matrix3<f64>,
    translation: Vector3<f64>,
}

impl PoseTransform {
    /// Builds the transform from an orientation and a translation.
    #[must_use]
    pub fn new(orientation: &Orientation, translation: Vector3<f64>) -> Self {
        Self {
            rotation: rotation_matrix(orientation),
            translation,
        }
    }

    /// Builds the transform for `pose`.
    #[must_use]
    pub fn from_pose(pose: &Pose) -> Self {
        Self::new(pose.orientation(), *pose.translation())
    }

    /// Same rotation, different translation.
    ///
    /// Lets a sweep over translations reuse one rotation matrix.
    #[must_use]
    pub fn with_translation(mut self, translation: Vector3<f64>) -> Self {
        self.translation = translation;
        self
    }

    /// The rotation matrix.
    #[must_use]
    pub const fn rotation(&self) -> &Matrix3<f64> {
        &self.rotation
    }

    /// The translation.
    #[must_use]
    pub const fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }

    /// Maps one platform-local point into the base frame.
    #[must_use]
    pub fn apply(&self, local: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * local.coords + self.translation)
    }

    /// Maps every platform-local point into the base frame, preserving order.
    #[must_use]
    pub fn apply_all(&self, local: &[Point3<f64>]) -> Vec<Point3<f64>> {
        local.iter().map(|p| self.apply(p)).collect()
    }
}

/// Maps platform-local joints into the base frame for `pose`.
///
/// # Example
///
/// ```
/// use platform_kinematics::transform_points;
/// use platform_types::{Point3, Pose};
///
/// let pose = Pose::new(1.0, 2.0, 160.0, 0.0, 0.0, 0.0).unwrap();
/// let world = transform_points(&pose, &[Point3::new(70.0, 0.0, 0.0)]);
/// assert!((world[0].x - 71.0).abs() < 1e-12);
/// assert!((world[0].z - 160.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn transform_points(pose: &Pose, local: &[Point3<f64>]) -> Vec<Point3<f64>> {
    PoseTransform::from_pose(pose).apply_all(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_at_zero() {
        let r = rotation_matrix(&Orientation::level());
        assert_relative_eq!(r, Matrix3::identity());
    }

    #[test]
    fn test_roll_rotates_y_into_z() {
        let r = rotation_matrix(&Orientation::from_radians(FRAC_PI_2, 0.0, 0.0).unwrap());
        let v = r * Vector3::y();
        assert_relative_eq!(v, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_pitch_rotates_z_into_x() {
        let r = rotation_matrix(&Orientation::from_radians(0.0, FRAC_PI_2, 0.0).unwrap());
        let v = r * Vector3::z();
        assert_relative_eq!(v, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_yaw_rotates_x_into_y() {
        let r = rotation_matrix(&Orientation::from_radians(0.0, 0.0, FRAC_PI_2).unwrap());
        let v = r * Vector3::x();
        assert_relative_eq!(v, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_composition_order() {
        // Roll is applied before yaw: rolling +90° then yawing +90° sends +Y to +Z,
        // whereas the reverse order would send +Y to -X.
        let orientation = Orientation::from_radians(FRAC_PI_2, 0.0, FRAC_PI_2).unwrap();
        let r = rotation_matrix(&orientation);
        assert_relative_eq!(r * Vector3::y(), Vector3::z(), epsilon = 1e-12);

        let expected = rotation_z(FRAC_PI_2) * rotation_y(0.0) * rotation_x(FRAC_PI_2);
        assert_eq!(r, expected);
    }

    #[test]
    fn test_matches_nalgebra_euler_convention() {
        let orientation = Orientation::from_degrees(12.0, -7.0, 33.0).unwrap();
        let ours = rotation_matrix(&orientation);
        let reference = nalgebra::Rotation3::from_euler_angles(
            orientation.roll(),
            orientation.pitch(),
            orientation.yaw(),
        );
        assert_relative_eq!(ours, *reference.matrix(), epsilon = 1e-12);
    }

    #[test]
    fn test_apply_translation_only() {
        let pose = Pose::new(5.0, -3.0, 160.0, 0.0, 0.0, 0.0).unwrap();
        let world = transform_points(&pose, &[Point3::new(10.0, 20.0, 0.0)]);
        assert_relative_eq!(world[0], Point3::new(15.0, 17.0, 160.0), epsilon = 1e-12);
    }

    #[test]
    fn test_with_translation_keeps_rotation() {
        let pose = Pose::new(0.0, 0.0, 160.0, 5.0, 5.0, 5.0).unwrap();
        let moved = PoseTransform::from_pose(&pose).with_translation(Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(moved.rotation(), PoseTransform::from_pose(&pose).rotation());
        assert_relative_eq!(*moved.translation(), Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_apply_all_preserves_order() {
        let pose = Pose::home();
        let local = [Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        let world = PoseTransform::from_pose(&pose).apply_all(&local);
        assert_eq!(world.len(), 2);
        assert_relative_eq!(world[1].y, 1.0);
    }
}
