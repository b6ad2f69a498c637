//! Greedy bank/port trading.
//!
//! Used by the discrete and probabilistic estimators and by calibration runs.
//! Surplus of each kind (in canonical order) is traded, whole trades only,
//! for the still-missing kind that takes the longest to arrive from income.

use crate::income::IncomeWeights;
use crate::resources::{PortFlags, ResourceKind, ResourceSet, TRADEABLE};

/// Returns the missing kind with the largest income weight.
///
/// Ties go to the kind that comes first in canonical order. Returns `None`
/// when nothing tradeable is missing.
#[inline]
pub fn most_needed(
    resources: &ResourceSet,
    target: &ResourceSet,
    weights: &IncomeWeights,
) -> Option<ResourceKind> {
    let mut best: Option<ResourceKind> = None;
    for kind in TRADEABLE {
        if resources.amount(kind) >= target.amount(kind) {
            continue;
        }
        match best {
            Some(b) if weights.rolls(kind) <= weights.rolls(b) => {}
            _ => best = Some(kind),
        }
    }
    best
}

/// Trades surplus for missing resources until the target is met or no
/// whole trade remains. Returns the number of trades made.
pub fn trade_pass(
    resources: &mut ResourceSet,
    target: &ResourceSet,
    weights: &IncomeWeights,
    ports: &PortFlags,
) -> u32 {
    let mut made = 0;
    for give in TRADEABLE {
        let ratio = ports.trade_ratio(give);
        let trades = resources.surplus(target, give) / ratio;

        for _ in 0..trades {
            if let Some(need) = most_needed(resources, target, weights) {
                if resources.amount(give) >= ratio {
                    resources.add_amount(need, 1);
                    resources.subtract_amount(give, ratio);
                    made += 1;
                }
            }
            if resources.contains(target) {
                return made;
            }
        }
    }
    made
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::UNREACHABLE_ROLLS;
    use ResourceKind::*;

    fn road() -> ResourceSet {
        ResourceSet::EMPTY.with(Clay, 1).with(Wood, 1)
    }

    #[test]
    fn most_needed_prefers_slowest_income() {
        let weights = IncomeWeights::from_rolls([6, 5, 5, 5, 9]);
        assert_eq!(
            most_needed(&ResourceSet::EMPTY, &road(), &weights),
            Some(Wood)
        );
    }

    #[test]
    fn most_needed_tie_goes_to_lower_index() {
        let weights = IncomeWeights::from_rolls([9, 5, 5, 5, 9]);
        assert_eq!(
            most_needed(&ResourceSet::EMPTY, &road(), &weights),
            Some(Clay)
        );
    }

    #[test]
    fn most_needed_none_when_target_met() {
        let weights = IncomeWeights::UNREACHABLE;
        assert_eq!(most_needed(&road(), &road(), &weights), None);
    }

    #[test]
    fn trade_pass_stops_once_target_met() {
        let mut hand = ResourceSet::EMPTY.with(Ore, 8);
        let target = ResourceSet::EMPTY.with(Wheat, 1);
        let made = trade_pass(&mut hand, &target, &IncomeWeights::UNREACHABLE, &PortFlags::NONE);
        assert_eq!(made, 1);
        assert_eq!(hand, ResourceSet::EMPTY.with(Ore, 4).with(Wheat, 1));
    }

    #[test]
    fn trade_pass_keeps_target_amount_of_giving_kind() {
        // Three sheep needed, seven held: only the four beyond target are tradeable.
        let mut hand = ResourceSet::EMPTY.with(Sheep, 7);
        let target = ResourceSet::EMPTY.with(Sheep, 3).with(Ore, 2);
        let made = trade_pass(&mut hand, &target, &IncomeWeights::UNREACHABLE, &PortFlags::NONE);
        assert_eq!(made, 1);
        assert_eq!(hand.amount(Sheep), 3);
        assert_eq!(hand.amount(Ore), 1);
    }

    #[test]
    fn trade_pass_spreads_across_missing_kinds() {
        let mut hand = ResourceSet::EMPTY.with(Wheat, 4);
        let weights = IncomeWeights::UNREACHABLE.with(Clay, 6).with(Wood, 6);
        let target = road();
        let made = trade_pass(
            &mut hand,
            &target,
            &weights,
            &PortFlags::NONE.with_port(Wheat),
        );
        assert_eq!(made, 2);
        assert!(hand.contains(&target));
        assert_eq!(hand.amount(Wheat), 0);
        assert_eq!(weights.rolls(Ore), UNREACHABLE_ROLLS);
    }
}
