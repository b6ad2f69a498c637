//! Resource sets.
//!
//! A `ResourceSet` is a small `Copy` value holding one non-negative count per
//! resource kind. Estimators copy sets freely; nothing is shared between a
//! simulated set and the caller's original.

use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use super::kind::{ResourceKind, ALL_KINDS, RESOURCE_KIND_COUNT, TRADEABLE};

/// Counts of each resource kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "NamedCounts", into = "NamedCounts")]
pub struct ResourceSet {
    counts: [u32; RESOURCE_KIND_COUNT],
}

impl ResourceSet {
    /// The empty set.
    pub const EMPTY: ResourceSet = ResourceSet {
        counts: [0; RESOURCE_KIND_COUNT],
    };

    /// Creates a set from counts in canonical order (clay, ore, sheep, wheat, wood, unknown).
    pub const fn from_counts(counts: [u32; RESOURCE_KIND_COUNT]) -> Self {
        ResourceSet { counts }
    }

    /// Returns a copy of this set with `kind` set to `amount`.
    pub fn with(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.counts[kind.index()] = amount;
        self
    }

    /// Returns the count of `kind`.
    #[inline]
    pub fn amount(&self, kind: ResourceKind) -> u32 {
        self.counts[kind.index()]
    }

    /// Adds `amount` units of `kind`, stopping at `u32::MAX`.
    #[inline]
    pub fn add_amount(&mut self, kind: ResourceKind, amount: u32) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Removes up to `amount` units of `kind`, stopping at zero.
    #[inline]
    pub fn subtract_amount(&mut self, kind: ResourceKind, amount: u32) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_sub(amount);
    }

    /// Subtracts another set kind-wise, clamping each count at zero.
    pub fn subtract(&mut self, other: &ResourceSet) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine = mine.saturating_sub(*theirs);
        }
    }

    /// Returns true if every tradeable count is at least the count in `other`.
    ///
    /// `Unknown` is ignored: a hand is judged by what it can actually spend.
    #[inline]
    pub fn contains(&self, other: &ResourceSet) -> bool {
        TRADEABLE
            .iter()
            .all(|k| self.counts[k.index()] >= other.counts[k.index()])
    }

    /// Returns the number of units of `kind` still missing to reach `target`.
    #[inline]
    pub fn shortfall(&self, target: &ResourceSet, kind: ResourceKind) -> u32 {
        target.amount(kind).saturating_sub(self.amount(kind))
    }

    /// Returns the number of units of `kind` held beyond `target`.
    #[inline]
    pub fn surplus(&self, target: &ResourceSet, kind: ResourceKind) -> u32 {
        self.amount(kind).saturating_sub(target.amount(kind))
    }

    /// Total number of cards, `Unknown` included.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Returns true if every count is zero.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterates `(kind, count)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ALL_KINDS.iter().map(move |&k| (k, self.counts[k.index()]))
    }
}

impl AddAssign<&ResourceSet> for ResourceSet {
    fn add_assign(&mut self, other: &ResourceSet) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine = mine.saturating_add(*theirs);
        }
    }
}

impl AddAssign for ResourceSet {
    fn add_assign(&mut self, other: ResourceSet) {
        *self += &other;
    }
}

impl Add for ResourceSet {
    type Output = ResourceSet;

    fn add(mut self, other: ResourceSet) -> ResourceSet {
        self += &other;
        self
    }
}

impl fmt::Display for ResourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}={}", kind.name(), count)?;
        }
        Ok(())
    }
}

/// Wire form of a `ResourceSet`: an object keyed by kind name.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NamedCounts {
    clay: u32,
    ore: u32,
    sheep: u32,
    wheat: u32,
    wood: u32,
    unknown: u32,
}

impl From<NamedCounts> for ResourceSet {
    fn from(n: NamedCounts) -> Self {
        ResourceSet::from_counts([n.clay, n.ore, n.sheep, n.wheat, n.wood, n.unknown])
    }
}

impl From<ResourceSet> for NamedCounts {
    fn from(set: ResourceSet) -> Self {
        let [clay, ore, sheep, wheat, wood, unknown] = set.counts;
        NamedCounts {
            clay,
            ore,
            sheep,
            wheat,
            wood,
            unknown,
        }
    }
}
