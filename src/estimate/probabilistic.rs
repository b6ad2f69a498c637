//! Probabilistic speed estimate.
//!
//! Tracks the full distribution of hands reachable after each turn, branching
//! on every dice sum with its true probability and trading greedily in every
//! branch. The estimate is the first turn at which the probability of having
//! reached the target is at least one half.
//!
//! Much slower than the discrete and fractional models: the number of live
//! hands grows with every turn until trading folds them back together.

use std::collections::BTreeMap;

use crate::income::{IncomeModel, IncomeWeights, DICE_PROBABILITIES, MAX_ROLL, MIN_ROLL};
use crate::resources::{PortFlags, ResourceSet};

use super::trade::trade_pass;
use super::{next_turn, EstimationResult, NonConvergence, SpeedEstimate};

/// Cumulative success probability at which the target counts as reached.
pub const REACHED_PROBABILITY: f64 = 0.5;

/// Exact dice-distribution model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbabilisticEstimator {
    weights: IncomeWeights,
    per_roll: [ResourceSet; MAX_ROLL + 1],
}

impl ProbabilisticEstimator {
    /// Creates an estimator from weights and the per-roll gain table.
    pub fn new(weights: IncomeWeights, per_roll: [ResourceSet; MAX_ROLL + 1]) -> Self {
        ProbabilisticEstimator { weights, per_roll }
    }

    /// Creates an estimator from an income model.
    ///
    /// Returns `None` for weights-only models, which have no per-roll table.
    pub fn from_model(model: &IncomeModel) -> Option<Self> {
        model
            .per_roll()
            .map(|table| ProbabilisticEstimator::new(model.weights(), *table))
    }
}

impl SpeedEstimate for ProbabilisticEstimator {
    fn weights(&self) -> IncomeWeights {
        self.weights
    }

    fn estimate_turns(
        &self,
        current: &ResourceSet,
        target: &ResourceSet,
        cutoff: u32,
        ports: &PortFlags,
    ) -> Result<EstimationResult, NonConvergence> {
        if current.contains(target) {
            return Ok(EstimationResult {
                resources: *current,
                turns: 0,
            });
        }

        // Ordered so that iteration, and therefore float summation and the
        // first reached hand, is the same on every call.
        let mut live: BTreeMap<ResourceSet, f64> = BTreeMap::new();
        live.insert(*current, 1.0);

        let mut reached_probability = 0.0;
        let mut first_reached: Option<ResourceSet> = None;
        let mut turns = 0;

        loop {
            turns = next_turn(turns, cutoff)?;

            let mut next: BTreeMap<ResourceSet, f64> = BTreeMap::new();
            for roll in MIN_ROLL..=MAX_ROLL {
                let gained = &self.per_roll[roll];
                let roll_probability = DICE_PROBABILITIES[roll] as f64;

                for (hand, probability) in &live {
                    let mut hand = *hand;
                    hand += gained;
                    let probability = probability * roll_probability;

                    if !hand.contains(target) {
                        trade_pass(&mut hand, target, &self.weights, ports);
                    }

                    if hand.contains(target) {
                        reached_probability += probability;
                        first_reached.get_or_insert(hand);
                    } else {
                        *next.entry(hand).or_insert(0.0) += probability;
                    }
                }
            }

            if reached_probability >= REACHED_PROBABILITY {
                if let Some(resources) = first_reached {
                    return Ok(EstimationResult { resources, turns });
                }
            }
            live = next;
        }
    }
}
