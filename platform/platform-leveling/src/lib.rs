//! Leveling, pose producers and wire messages for parallel platforms.
//!
//! Everything here sits on top of the pure kinematics in
//! [`platform_kinematics`] and talks to the outside world through values:
//!
//! - [`LevelingController`] - turns measured tilt into rate-limited,
//!   validated correction commands
//! - [`PoseSource`] - animation ([`SinusoidalPoseSource`]) and scripted
//!   ([`ScriptedPoseSource`]) pose producers
//! - [`PoseRequest`] / [`LegLengthResponse`] - serde messages with
//!   [`handle_pose_request`] and [`handle_level_request`]
//!
//! # Layer 0 Crate
//!
//! No I/O, no threads, no clocks. Callers own the transport, the timing and
//! the actuator policy.
//!
//! # Example
//!
//! ```
//! use platform_kinematics::{solve, ValidationParams};
//! use platform_leveling::{PoseSource, ScriptedPoseSource};
//! use platform_types::{create_configuration, GeometryParams, LegLimits};
//!
//! let params = GeometryParams::default().limits(LegLimits::new(140.0, 220.0));
//! let config = create_configuration("6-3", &params).unwrap();
//!
//! let mut script = ScriptedPoseSource::comparison_sweep(160.0).unwrap();
//! while let Some(pose) = script.next_pose() {
//!     assert_eq!(solve(&config, &pose).leg_lengths().len(), 6);
//! }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod controller;
mod protocol;
mod source;

pub use config::{LevelingConfig, LevelingMode};
pub use controller::{LevelingCommand, LevelingController, LevelingDecision, correction_target};
pub use protocol::{
    GeometryRequest, LegLengthResponse, LevelRequest, PoseEcho, PoseRequest, TopologyCatalog,
    TopologyListing, available_topologies, handle_level_request, handle_pose_request,
};
pub use source::{
    PoseSource, ScriptedPoseSource, Sinusoid, SinusoidalMotion, SinusoidalPoseSource,
};
