//! Shared command-line argument groups.

use anyhow::{Context, Result};
use clap::Args;
use platform_types::{
    Configuration, GeometryParams, LegLimits, Orientation, Pose, create_configuration,
};

/// Platform geometry in millimetres and degrees.
#[derive(Args, Debug, Clone)]
pub struct GeometryArgs {
    /// Base anchor circle radius (mm)
    #[arg(long, default_value_t = 120.0)]
    pub base_radius: f64,

    /// Platform joint circle radius (mm)
    #[arg(long, default_value_t = 70.0)]
    pub platform_radius: f64,

    /// Angle of base anchor 0 from +X (deg)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub base_phase: f64,

    /// Leg length at the neutral pose (mm)
    #[arg(long, default_value_t = 150.0)]
    pub nominal: f64,

    /// Shortest allowed leg (mm)
    #[arg(long, default_value_t = 100.0)]
    pub min_length: f64,

    /// Longest allowed leg (mm)
    #[arg(long, default_value_t = 200.0)]
    pub max_length: f64,
}

impl GeometryArgs {
    pub fn params(&self) -> GeometryParams {
        GeometryParams::default()
            .base_radius(self.base_radius)
            .platform_radius(self.platform_radius)
            .base_phase_deg(self.base_phase)
            .nominal_leg_length(self.nominal)
            .limits(LegLimits::new(self.min_length, self.max_length))
    }
}

/// A topology together with its geometry.
#[derive(Args, Debug, Clone)]
pub struct PlatformArgs {
    /// Topology id (see `platform topologies`)
    #[arg(short, long, default_value = "6-3")]
    pub topology: String,

    #[command(flatten)]
    pub geometry: GeometryArgs,
}

impl PlatformArgs {
    pub fn configuration(&self) -> Result<Configuration> {
        create_configuration(&self.topology, &self.geometry.params())
            .with_context(|| format!("Failed to build '{}' configuration", self.topology))
    }
}

/// Roll, pitch and yaw in degrees.
#[derive(Args, Debug, Clone, Copy)]
pub struct OrientationArgs {
    /// Roll (deg)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub roll: f64,

    /// Pitch (deg)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pitch: f64,

    /// Yaw (deg)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub yaw: f64,
}

impl OrientationArgs {
    pub fn orientation(&self) -> Result<Orientation> {
        Orientation::from_degrees(self.roll, self.pitch, self.yaw).context("Invalid orientation")
    }
}

/// Full pose: translation in millimetres plus orientation.
#[derive(Args, Debug, Clone, Copy)]
pub struct PoseArgs {
    /// X translation (mm)
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x: f64,

    /// Y translation (mm)
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub y: f64,

    /// Z translation, platform height (mm)
    #[arg(short, long, default_value_t = platform_types::HOME_HEIGHT)]
    pub z: f64,

    #[command(flatten)]
    pub orientation: OrientationArgs,
}

impl PoseArgs {
    pub fn pose(&self) -> Result<Pose> {
        let o = &self.orientation;
        Pose::new(self.x, self.y, self.z, o.roll, o.pitch, o.yaw).context("Invalid pose")
    }
}
