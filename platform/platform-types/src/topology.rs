//! Platform topologies.
//!
//! A topology fixes how many base anchors and platform joints a platform has,
//! which joint each leg attaches to, and how the joint polygon is rotated
//! relative to the base polygon. All variants are described by a single
//! table; [`Topology::layout`] is the only place that table is read.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Static description of one topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologyLayout {
    /// Identifier used at the boundary (`"6-3"`, `"8-8"`, ...).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Number of base anchors (equal to the leg count).
    pub base_count: usize,
    /// Number of distinct platform joints.
    pub joint_count: usize,
    /// Platform joint index for each leg, in leg order.
    pub leg_to_joint: &'static [usize],
    /// Rotation of the joint polygon relative to the base polygon, in degrees.
    pub platform_phase_offset_deg: f64,
}

static LAYOUTS: [TopologyLayout; 7] = [
    TopologyLayout {
        id: "3-3",
        name: "3-3 Tripod",
        description: "3 base points, 3 platform points - simplest configuration",
        base_count: 3,
        joint_count: 3,
        leg_to_joint: &[0, 1, 2],
        platform_phase_offset_deg: 0.0,
    },
    TopologyLayout {
        id: "4-4",
        name: "4-4 Square",
        description: "4 base points, 4 platform points - square configuration",
        base_count: 4,
        joint_count: 4,
        leg_to_joint: &[0, 1, 2, 3],
        platform_phase_offset_deg: 0.0,
    },
    TopologyLayout {
        id: "6-3",
        name: "6-3 Standard",
        description: "6 base points, 3 platform points - standard pairing",
        base_count: 6,
        joint_count: 3,
        leg_to_joint: &[0, 0, 1, 1, 2, 2],
        platform_phase_offset_deg: 30.0,
    },
    TopologyLayout {
        id: "6-3-asymmetric",
        name: "6-3 Asymmetric",
        description: "6 base points, 3 platform points - asymmetric pairing",
        base_count: 6,
        joint_count: 3,
        leg_to_joint: &[0, 1, 1, 2, 2, 0],
        platform_phase_offset_deg: 0.0,
    },
    // Same geometry as "6-3"; kept as its own tag so a redundant-support
    // layout can diverge later without changing callers.
    TopologyLayout {
        id: "6-3-redundant",
        name: "6-3 Redundant",
        description: "6 base points, 3 platform points - redundant configuration",
        base_count: 6,
        joint_count: 3,
        leg_to_joint: &[0, 0, 1, 1, 2, 2],
        platform_phase_offset_deg: 30.0,
    },
    TopologyLayout {
        id: "6-6",
        name: "6-6 Hexagonal",
        description: "6 base points, 6 platform points - classic Stewart platform",
        base_count: 6,
        joint_count: 6,
        leg_to_joint: &[0, 1, 2, 3, 4, 5],
        platform_phase_offset_deg: 0.0,
    },
    TopologyLayout {
        id: "8-8",
        name: "8-8 Octagonal",
        description: "8 base points, 8 platform points - maximum redundancy",
        base_count: 8,
        joint_count: 8,
        leg_to_joint: &[0, 1, 2, 3, 4, 5, 6, 7],
        platform_phase_offset_deg: 0.0,
    },
];

/// Supported platform topologies.
///
/// # Example
///
/// ```
/// use platform_types::Topology;
///
/// let topology: Topology = "6-3".parse().unwrap();
/// assert_eq!(topology, Topology::SixThree);
/// assert_eq!(topology.leg_count(), 6);
/// assert_eq!(topology.joint_count(), 3);
/// assert_eq!(topology.leg_to_joint(), &[0, 0, 1, 1, 2, 2]);
///
/// assert!("5-5".parse::<Topology>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Topology {
    /// Three legs, three joints, one leg per joint.
    #[cfg_attr(feature = "serde", serde(rename = "3-3"))]
    ThreeThree,
    /// Four legs on a square.
    #[cfg_attr(feature = "serde", serde(rename = "4-4"))]
    FourFour,
    /// Six legs paired onto three joints, joints rotated 30° from the base.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "6-3"))]
    SixThree,
    /// Six legs onto three joints with a shifted pairing and no phase offset.
    #[cfg_attr(feature = "serde", serde(rename = "6-3-asymmetric"))]
    SixThreeAsymmetric,
    /// Redundant-support variant of [`Topology::SixThree`].
    #[cfg_attr(feature = "serde", serde(rename = "6-3-redundant"))]
    SixThreeRedundant,
    /// Classic hexagonal Stewart platform.
    #[cfg_attr(feature = "serde", serde(rename = "6-6"))]
    SixSix,
    /// Eight legs on an octagon.
    #[cfg_attr(feature = "serde", serde(rename = "8-8"))]
    EightEight,
}

impl Topology {
    /// Every supported topology, in catalogue order.
    pub const ALL: [Self; 7] = [
        Self::ThreeThree,
        Self::FourFour,
        Self::SixThree,
        Self::SixThreeAsymmetric,
        Self::SixThreeRedundant,
        Self::SixSix,
        Self::EightEight,
    ];

    /// Returns the static layout for this topology.
    #[must_use]
    pub fn layout(self) -> &'static TopologyLayout {
        &LAYOUTS[self as usize]
    }

    /// Boundary identifier, for example `"6-3-asymmetric"`.
    #[must_use]
    pub fn id(self) -> &'static str {
        self.layout().id
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.layout().name
    }

    /// One-line description.
    #[must_use]
    pub fn description(self) -> &'static str {
        self.layout().description
    }

    /// Number of legs (and base anchors).
    #[must_use]
    pub fn leg_count(self) -> usize {
        self.layout().base_count
    }

    /// Number of distinct platform joints.
    #[must_use]
    pub fn joint_count(self) -> usize {
        self.layout().joint_count
    }

    /// Platform joint index for each leg.
    #[must_use]
    pub fn leg_to_joint(self) -> &'static [usize] {
        self.layout().leg_to_joint
    }

    /// Joint polygon rotation relative to the base polygon, in degrees.
    #[must_use]
    pub fn platform_phase_offset_deg(self) -> f64 {
        self.layout().platform_phase_offset_deg
    }

    /// Returns `true` when more than one leg attaches to the same joint.
    #[must_use]
    pub fn has_shared_joints(self) -> bool {
        self.joint_count() < self.leg_count()
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Topology {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Self::ALL
            .into_iter()
            .find(|topology| topology.id() == id)
            .ok_or_else(|| PlatformError::UnknownTopology(s.to_string()))
    }
}
