//! Resource kinds.
//!
//! Five tradeable kinds in canonical order (clay, ore, sheep, wheat, wood)
//! plus `Unknown` for cards whose kind has not been observed.

use serde::{Deserialize, Serialize};

/// Number of resource kinds, including `Unknown`.
pub const RESOURCE_KIND_COUNT: usize = 6;

/// Number of tradeable resource kinds.
pub const TRADEABLE_COUNT: usize = 5;

/// A kind of resource card.
///
/// The `#[repr(u8)]` discriminant doubles as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ResourceKind {
    Clay = 0,
    Ore = 1,
    Sheep = 2,
    Wheat = 3,
    Wood = 4,
    Unknown = 5,
}

/// Tradeable kinds in the canonical order used by every trade pass.
pub const TRADEABLE: [ResourceKind; TRADEABLE_COUNT] = [
    ResourceKind::Clay,
    ResourceKind::Ore,
    ResourceKind::Sheep,
    ResourceKind::Wheat,
    ResourceKind::Wood,
];

/// All kinds, tradeable first.
pub const ALL_KINDS: [ResourceKind; RESOURCE_KIND_COUNT] = [
    ResourceKind::Clay,
    ResourceKind::Ore,
    ResourceKind::Sheep,
    ResourceKind::Wheat,
    ResourceKind::Wood,
    ResourceKind::Unknown,
];

impl ResourceKind {
    /// Returns the array index of this kind.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the lowercase name used in scenario files and output.
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Clay => "clay",
            ResourceKind::Ore => "ore",
            ResourceKind::Sheep => "sheep",
            ResourceKind::Wheat => "wheat",
            ResourceKind::Wood => "wood",
            ResourceKind::Unknown => "unknown",
        }
    }

    /// Returns true for the five kinds that can be traded and gathered.
    pub const fn is_tradeable(self) -> bool {
        !matches!(self, ResourceKind::Unknown)
    }
}
