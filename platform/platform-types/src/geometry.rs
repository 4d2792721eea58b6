//! Attachment-point layouts.
//!
//! Base anchors and platform joints both sit on regular polygons:
//! point `k` of `n` lies at angle `phase + k * 2π / n` on a circle of the
//! given radius, in the `z = 0` plane of its own frame.

use std::f64::consts::TAU;

use nalgebra::Point3;

use crate::params::GeometryParams;
use crate::topology::Topology;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Samples `count` points evenly around a circle in the `z = 0` plane.
///
/// # Example
///
/// ```
/// use platform_types::regular_polygon;
///
/// let square = regular_polygon(4, 10.0, 0.0);
/// assert_eq!(square.len(), 4);
/// assert!((square[1].y - 10.0).abs() < 1e-12);
/// assert!(square.iter().all(|p| p.z == 0.0));
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn regular_polygon(count: usize, radius: f64, phase: f64) -> Vec<Point3<f64>> {
    (0..count)
        .map(|k| {
            let angle = phase + k as f64 * TAU / count as f64;
            Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect()
}

/// Builds the anchor layout for `topology` from `params`.
///
/// The platform polygon is rotated by the topology's phase offset relative
/// to the base polygon. Parameters are not validated here.
///
/// # Example
///
/// ```
/// use platform_types::{build_anchors, GeometryParams, Topology};
///
/// let anchors = build_anchors(Topology::SixThree, &GeometryParams::default());
/// assert_eq!(anchors.base().len(), 6);
/// assert_eq!(anchors.joints().len(), 3);
/// ```
#[must_use]
pub fn build_anchors(topology: Topology, params: &GeometryParams) -> AnchorSet {
    let base_phase = params.base_phase_deg.to_radians();
    let platform_phase =
        (params.base_phase_deg + topology.platform_phase_offset_deg()).to_radians();
    AnchorSet::new(
        regular_polygon(topology.leg_count(), params.base_radius, base_phase),
        regular_polygon(topology.joint_count(), params.platform_radius, platform_phase),
    )
}

/// Base anchors in the fixed frame and platform joints in the platform frame.
///
/// Both sets lie in their frame's `z = 0` plane. The base set has one point
/// per leg; the joint set has one point per distinct platform joint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnchorSet {
    base: Vec<Point3<f64>>,
    joints: Vec<Point3<f64>>,
}

impl AnchorSet {
    /// Creates an anchor set from explicit points.
    #[must_use]
    pub const fn new(base: Vec<Point3<f64>>, joints: Vec<Point3<f64>>) -> Self {
        Self { base, joints }
    }

    /// Base anchors, one per leg, in leg order.
    #[must_use]
    pub fn base(&self) -> &[Point3<f64>] {
        &self.base
    }

    /// Platform joints in the platform-local frame.
    #[must_use]
    pub fn joints(&self) -> &[Point3<f64>] {
        &self.joints
    }
}
