//! Discrete speed estimate.
//!
//! Simulates turns one at a time. A kind with weight `w` pays out one whole
//! unit on every turn that is a multiple of `w` (every turn if `w` is zero),
//! and surplus is traded greedily at each turn boundary.
//!
//! The periodic payout is a known source of bias: a single slow resource can
//! dominate the result so that holdings and income of every other kind stop
//! mattering. `FractionalEstimator` is the corrected model; this one is kept
//! as-is so the two stay comparable.

use crate::income::IncomeWeights;
use crate::resources::{PortFlags, ResourceSet, TRADEABLE};

use super::trade::trade_pass;
use super::{next_turn, EstimationResult, NonConvergence, SpeedEstimate};

/// Turn-by-turn simulation with whole-unit income and trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteEstimator {
    weights: IncomeWeights,
}

impl DiscreteEstimator {
    /// Creates an estimator for the given income.
    pub fn new(weights: IncomeWeights) -> Self {
        DiscreteEstimator { weights }
    }

    /// Adds this turn's periodic income to `resources`.
    #[inline]
    fn collect(&self, resources: &mut ResourceSet, turn: u32) {
        for kind in TRADEABLE {
            let rolls = self.weights.rolls(kind);
            if rolls == 0 || turn % rolls == 0 {
                resources.add_amount(kind, 1);
            }
        }
    }
}

impl SpeedEstimate for DiscreteEstimator {
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
        let mut resources = *current;
        let mut turns = 0;

        if !resources.contains(target) {
            trade_pass(&mut resources, target, &self.weights, ports);
        }

        while !resources.contains(target) {
            turns = next_turn(turns, cutoff)?;

            self.collect(&mut resources, turns);

            if !resources.contains(target) {
                trade_pass(&mut resources, target, &self.weights, ports);
            }
        }

        Ok(EstimationResult { resources, turns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceKind::{self, *};

    fn road() -> ResourceSet {
        ResourceSet::EMPTY.with(Clay, 1).with(Wood, 1)
    }

    fn only(kind: ResourceKind, rolls: u32) -> IncomeWeights {
        IncomeWeights::UNREACHABLE.with(kind, rolls)
    }

    #[test]
    fn already_affordable_takes_zero_turns() {
        let est = DiscreteEstimator::new(IncomeWeights::UNREACHABLE);
        let hand = road().with(Ore, 2);
        let result = est.estimate_turns(&hand, &road(), 10, &PortFlags::NONE).unwrap();
        assert_eq!(result.turns, 0);
        assert_eq!(result.resources, hand);
    }

    #[test]
    fn road_from_nothing_with_equal_income() {
        let weights = IncomeWeights::UNREACHABLE.with(Clay, 4).with(Wood, 4);
        let est = DiscreteEstimator::new(weights);
        let result = est
            .estimate_turns(&ResourceSet::EMPTY, &road(), 50, &PortFlags::NONE)
            .unwrap();
        assert_eq!(result.turns, 4);
        assert_eq!(result.resources, road());
    }

    #[test]
    fn partial_trade_at_turn_zero_does_not_finish() {
        let weights = IncomeWeights::UNREACHABLE.with(Clay, 6).with(Wood, 9);
        let est = DiscreteEstimator::new(weights);
        let hand = ResourceSet::EMPTY.with(Wheat, 4);
        let result = est.estimate_turns(&hand, &road(), 10, &PortFlags::NONE).unwrap();
        // Four wheat buy the slower wood; clay still has to arrive on turn 6.
        assert_eq!(result.turns, 6);
        assert_eq!(result.resources, road());
    }

    #[test]
    fn partial_trade_without_income_runs_out() {
        let est = DiscreteEstimator::new(IncomeWeights::UNREACHABLE);
        let hand = ResourceSet::EMPTY.with(Wheat, 4);
        let err = est
            .estimate_turns(&hand, &road(), 10, &PortFlags::NONE)
            .unwrap_err();
        assert_eq!(err, NonConvergence { cutoff: 10 });
    }

    #[test]
    fn port_ratios_are_two_three_four() {
        let est = DiscreteEstimator::new(IncomeWeights::UNREACHABLE);
        let hand = ResourceSet::EMPTY.with(Ore, 4);
        let target = ResourceSet::EMPTY.with(Wheat, 1);

        let port = PortFlags::NONE.with_port(Ore);
        let result = est.estimate_turns(&hand, &target, 5, &port).unwrap();
        assert_eq!(result.turns, 0);
        assert_eq!(result.resources.amount(Ore), 2);

        let misc = PortFlags::NONE.with_misc_port();
        let result = est.estimate_turns(&hand, &target, 5, &misc).unwrap();
        assert_eq!(result.resources.amount(Ore), 1);

        let result = est.estimate_turns(&hand, &target, 5, &PortFlags::NONE).unwrap();
        assert_eq!(result.resources.amount(Ore), 0);
        assert_eq!(result.resources.amount(Wheat), 1);
    }

    #[test]
    fn cutoff_is_inclusive() {
        let est = DiscreteEstimator::new(only(Clay, 5));
        let target = ResourceSet::EMPTY.with(Clay, 1);

        let result = est
            .estimate_turns(&ResourceSet::EMPTY, &target, 5, &PortFlags::NONE)
            .unwrap();
        assert_eq!(result.turns, 5);

        let err = est
            .estimate_turns(&ResourceSet::EMPTY, &target, 4, &PortFlags::NONE)
            .unwrap_err();
        assert_eq!(err.cutoff, 4);
    }

    #[test]
    fn zero_cutoff_only_allows_trading() {
        let est = DiscreteEstimator::new(only(Clay, 1));
        let target = ResourceSet::EMPTY.with(Clay, 1);
        assert!(est
            .estimate_turns(&ResourceSet::EMPTY, &target, 0, &PortFlags::NONE)
            .is_err());
        let hand = ResourceSet::EMPTY.with(Sheep, 4);
        let result = est.estimate_turns(&hand, &target, 0, &PortFlags::NONE).unwrap();
        assert_eq!(result.turns, 0);
    }

    #[test]
    fn zero_weight_pays_every_turn() {
        let est = DiscreteEstimator::new(only(Ore, 0));
        let target = ResourceSet::EMPTY.with(Ore, 3);
        let result = est
            .estimate_turns(&ResourceSet::EMPTY, &target, 10, &PortFlags::NONE)
            .unwrap();
        assert_eq!(result.turns, 3);
    }

    #[test]
    fn income_is_traded_mid_simulation() {
        // Sheep every turn, ore never: four sheep become one ore on turn 4.
        let est = DiscreteEstimator::new(only(Sheep, 1));
        let target = ResourceSet::EMPTY.with(Ore, 1);
        let result = est
            .estimate_turns(&ResourceSet::EMPTY, &target, 10, &PortFlags::NONE)
            .unwrap();
        assert_eq!(result.turns, 4);
        assert_eq!(result.resources, target);

        let result = est
            .estimate_turns(&ResourceSet::EMPTY, &target, 10, &PortFlags::NONE.with_port(Sheep))
            .unwrap();
        assert_eq!(result.turns, 2);
    }

    #[test]
    fn caller_set_is_untouched() {
        let est = DiscreteEstimator::new(only(Clay, 2));
        let hand = ResourceSet::EMPTY.with(Wheat, 8);
        let before = hand;
        let _ = est.estimate_turns(&hand, &road(), 20, &PortFlags::NONE);
        assert_eq!(hand, before);
    }

    #[test]
    fn more_resources_never_slower() {
        let weights = IncomeWeights::from_rolls([5, 9, 6, 7, 4]);
        let est = DiscreteEstimator::new(weights);
        let city = ResourceSet::EMPTY.with(Ore, 3).with(Wheat, 2);
        let base = ResourceSet::EMPTY.with(Sheep, 3);
        let slow = est
            .estimate_turns(&base, &city, 60, &PortFlags::NONE)
            .unwrap()
            .turns;
        for kind in TRADEABLE {
            let richer = base.with(kind, base.amount(kind) + 1);
            let fast = est
                .estimate_turns(&richer, &city, 60, &PortFlags::NONE)
                .unwrap()
                .turns;
            assert!(fast <= slow, "{:?}: {} > {}", kind, fast, slow);
        }
    }

    #[test]
    fn income_on_a_full_count_does_not_wrap() {
        let est = DiscreteEstimator::new(IncomeWeights::UNREACHABLE.with(Clay, 1).with(Wood, 2));
        let hand = ResourceSet::EMPTY.with(Clay, u32::MAX);
        let target = hand.with(Wood, 1);
        let result = est.estimate_turns(&hand, &target, 5, &PortFlags::NONE).unwrap();
        assert_eq!(result.turns, 2);
        assert_eq!(result.resources, target);

        let no_ore = ResourceSet::EMPTY.with(Ore, 1).with(Clay, u32::MAX);
        assert_eq!(
            est.estimate_turns(&hand, &no_ore, 5, &PortFlags::NONE),
            Err(NonConvergence { cutoff: 5 })
        );
    }

    #[test]
    fn unbounded_cutoff_still_converges() {
        let est = DiscreteEstimator::new(IncomeWeights::UNREACHABLE.with(Clay, 4).with(Wood, 4));
        let result = est
            .estimate_turns(&ResourceSet::EMPTY, &road(), u32::MAX, &PortFlags::NONE)
            .unwrap();
        assert_eq!(result.turns, 4);
    }
}
