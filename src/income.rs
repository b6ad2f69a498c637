//! Income model.
//!
//! Turns the dice numbers a player's buildings touch into the two views the
//! estimators consume: expected rolls per unit of each resource, and the exact
//! resources gained on each possible dice sum. Recomputed whenever the
//! player's position (or the robber) changes; never mutated by an estimator.

use serde::{Deserialize, Serialize};

use crate::resources::{ResourceKind, ResourceSet, TRADEABLE, TRADEABLE_COUNT};

/// Rolls-per-resource value used for a kind the player cannot gather at all.
pub const UNREACHABLE_ROLLS: u32 = 55555;

/// Lowest two-dice sum.
pub const MIN_ROLL: usize = 2;

/// Highest two-dice sum.
pub const MAX_ROLL: usize = 12;

/// Probability of each two-dice sum, indexed by the sum (0 and 1 unused).
pub const DICE_PROBABILITIES: [f32; MAX_ROLL + 1] = [
    0.0,
    0.0,
    1.0 / 36.0,
    2.0 / 36.0,
    3.0 / 36.0,
    4.0 / 36.0,
    5.0 / 36.0,
    6.0 / 36.0,
    5.0 / 36.0,
    4.0 / 36.0,
    3.0 / 36.0,
    2.0 / 36.0,
    1.0 / 36.0,
];

/// Expected number of rolls between successive units of each tradeable kind.
///
/// A weight of zero is treated by the estimators as "arrives every turn".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "NamedWeights", into = "NamedWeights")]
pub struct IncomeWeights {
    rolls: [u32; TRADEABLE_COUNT],
}

impl Default for IncomeWeights {
    fn default() -> Self {
        IncomeWeights::UNREACHABLE
    }
}

impl IncomeWeights {
    /// No income at all.
    pub const UNREACHABLE: IncomeWeights = IncomeWeights {
        rolls: [UNREACHABLE_ROLLS; TRADEABLE_COUNT],
    };

    /// Creates weights in canonical order (clay, ore, sheep, wheat, wood).
    pub const fn from_rolls(rolls: [u32; TRADEABLE_COUNT]) -> Self {
        IncomeWeights { rolls }
    }

    /// Returns a copy with the weight of `kind` replaced.
    pub fn with(mut self, kind: ResourceKind, rolls: u32) -> Self {
        if kind.is_tradeable() {
            self.rolls[kind.index()] = rolls;
        }
        self
    }

    /// Returns the expected rolls per unit of `kind`.
    ///
    /// `Unknown` is never gathered and reports `UNREACHABLE_ROLLS`.
    #[inline]
    pub fn rolls(&self, kind: ResourceKind) -> u32 {
        if kind.is_tradeable() {
            self.rolls[kind.index()]
        } else {
            UNREACHABLE_ROLLS
        }
    }
}

/// One number token touched by one of the player's buildings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberTouch {
    /// Dice sum on the hex, 2..=12.
    pub number: u8,
    /// Resource the hex produces.
    pub resource: ResourceKind,
    /// Hex coordinate, used to exclude the hex under the robber.
    pub hex: u16,
}

/// Every number token a player's settlements and cities touch.
///
/// A city is listed twice, since it collects two units per roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerNumbers {
    touches: Vec<NumberTouch>,
}

impl PlayerNumbers {
    /// Creates an empty set of touches.
    pub fn new() -> Self {
        PlayerNumbers::default()
    }

    /// Records that a building touches `hex`, which yields `resource` on `number`.
    pub fn add(&mut self, number: u8, resource: ResourceKind, hex: u16) {
        self.touches.push(NumberTouch {
            number,
            resource,
            hex,
        });
    }

    /// Touches that produce on a roll, skipping the robbed hex and malformed entries.
    fn producing(&self, robber: Option<u16>) -> impl Iterator<Item = &NumberTouch> {
        self.touches.iter().filter(move |t| {
            let n = t.number as usize;
            (MIN_ROLL..=MAX_ROLL).contains(&n)
                && n != 7
                && t.resource.is_tradeable()
                && Some(t.hex) != robber
        })
    }

    /// Computes expected rolls per unit of each resource.
    pub fn income_weights(&self, robber: Option<u16>) -> IncomeWeights {
        let mut probability = [0.0f32; TRADEABLE_COUNT];
        for touch in self.producing(robber) {
            probability[touch.resource.index()] += DICE_PROBABILITIES[touch.number as usize];
        }

        let mut weights = IncomeWeights::UNREACHABLE;
        for kind in TRADEABLE {
            let p = probability[kind.index()];
            if p != 0.0 {
                weights.rolls[kind.index()] = (1.0 / p).round() as u32;
            }
        }
        weights
    }

    /// Computes the resources gained on each dice sum, indexed by the sum.
    pub fn resources_for_roll(&self, robber: Option<u16>) -> [ResourceSet; MAX_ROLL + 1] {
        let mut table = [ResourceSet::EMPTY; MAX_ROLL + 1];
        for touch in self.producing(robber) {
            table[touch.number as usize].add_amount(touch.resource, 1);
        }
        table
    }
}

/// Precomputed income for one player position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeModel {
    weights: IncomeWeights,
    per_roll: Option<[ResourceSet; MAX_ROLL + 1]>,
}

impl IncomeModel {
    /// Builds the full model from board touches.
    pub fn from_numbers(numbers: &PlayerNumbers, robber: Option<u16>) -> Self {
        IncomeModel {
            weights: numbers.income_weights(robber),
            per_roll: Some(numbers.resources_for_roll(robber)),
        }
    }

    /// Builds a weights-only model. It has no per-roll table.
    pub fn from_weights(weights: IncomeWeights) -> Self {
        IncomeModel {
            weights,
            per_roll: None,
        }
    }

    /// Returns the rolls-per-resource weights.
    pub fn weights(&self) -> IncomeWeights {
        self.weights
    }

    /// Returns the per-roll gains, if the model was built from board touches.
    pub fn per_roll(&self) -> Option<&[ResourceSet; MAX_ROLL + 1]> {
        self.per_roll.as_ref()
    }
}

/// Wire form of `IncomeWeights`; omitted kinds are unreachable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamedWeights {
    #[serde(default = "unreachable")]
    clay: u32,
    #[serde(default = "unreachable")]
    ore: u32,
    #[serde(default = "unreachable")]
    sheep: u32,
    #[serde(default = "unreachable")]
    wheat: u32,
    #[serde(default = "unreachable")]
    wood: u32,
}

fn unreachable() -> u32 {
    UNREACHABLE_ROLLS
}

impl From<NamedWeights> for IncomeWeights {
    fn from(n: NamedWeights) -> Self {
        IncomeWeights::from_rolls([n.clay, n.ore, n.sheep, n.wheat, n.wood])
    }
}

impl From<IncomeWeights> for NamedWeights {
    fn from(w: IncomeWeights) -> Self {
        let [clay, ore, sheep, wheat, wood] = w.rolls;
        NamedWeights {
            clay,
            ore,
            sheep,
            wheat,
            wood,
        }
    }
}
