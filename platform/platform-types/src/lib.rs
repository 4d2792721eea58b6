//! Core data model for parallel (Stewart-type) motion platforms.
//!
//! This crate defines the types every other platform crate builds on:
//!
//! - [`Topology`] - Closed set of supported leg/joint layouts, table driven
//! - [`GeometryParams`] and [`LegLimits`] - Radii, phase, nominal length, limits
//! - [`Configuration`] - Immutable platform description with its [`AnchorSet`]
//! - [`Pose`] and [`Orientation`] - Desired platform pose, validated at construction
//! - [`PlatformError`] - Configuration and pose errors
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Embedded controllers
//!
//! # Units and Frames
//!
//! Lengths are millimetres. Angles are degrees at construction and radians
//! internally. The base frame is right-handed with Z up; base anchors lie in
//! its `z = 0` plane. Platform joints are given in the platform's own frame,
//! also in its `z = 0` plane.
//!
//! # Example
//!
//! ```
//! use platform_types::{create_configuration, GeometryParams, LegLimits, Pose};
//!
//! let params = GeometryParams::default()
//!     .base_radius(120.0)
//!     .platform_radius(70.0)
//!     .nominal_leg_length(150.0)
//!     .limits(LegLimits::new(140.0, 220.0));
//!
//! let config = create_configuration("6-3", &params).unwrap();
//! assert_eq!(config.leg_count(), 6);
//!
//! let pose = Pose::new(0.0, 0.0, 160.0, 0.0, 0.0, 0.0).unwrap();
//! assert!((pose.z() - 160.0).abs() < 1e-12);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for parameter and
//!   topology types

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod configuration;
mod error;
mod geometry;
mod params;
mod pose;
mod topology;

pub use configuration::{Configuration, create_configuration};
pub use error::{PlatformError, PlatformResult, require_finite, require_positive};
pub use geometry::{AnchorSet, build_anchors, regular_polygon};
pub use params::{GeometryParams, LegLimits};
pub use pose::{HOME_HEIGHT, Orientation, Pose};
pub use topology::{Topology, TopologyLayout};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
