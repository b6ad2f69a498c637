//! Ranking candidate build plans by time to afford.
//!
//! The estimator is passed in explicitly; plans and pieces carry no
//! reference back to the player or agent that owns them.

use rayon::prelude::*;
use serde::Serialize;

use crate::estimate::SpeedEstimate;
use crate::resources::{PortFlags, ResourceSet};

use super::stack::BuildPlan;

/// A candidate plan with its estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPlan {
    /// Position of the plan in the caller's candidate list.
    pub index: usize,
    pub plan: BuildPlan,
    /// Turns until the plan's total cost is affordable.
    pub turns: u32,
    /// Hand the estimator reached, see `EstimationResult::resources`.
    pub resources: ResourceSet,
}

/// Estimates every plan's total cost and returns the reachable ones, fastest
/// first. Ties keep the caller's order.
///
/// Plans that do not converge within `cutoff` are left out. Estimates run in
/// parallel on the current rayon pool.
pub fn rank_plans<E>(
    estimator: &E,
    plans: Vec<BuildPlan>,
    current: &ResourceSet,
    cutoff: u32,
    ports: &PortFlags,
) -> Vec<RankedPlan>
where
    E: SpeedEstimate + Sync + ?Sized,
{
    let mut ranked: Vec<RankedPlan> = plans
        .into_par_iter()
        .enumerate()
        .filter_map(|(index, plan)| {
            let target = plan.total_cost();
            match estimator.estimate_turns(current, &target, cutoff, ports) {
                Ok(result) => Some(RankedPlan {
                    index,
                    plan,
                    turns: result.turns,
                    resources: result.resources,
                }),
                Err(e) => {
                    tracing::trace!(index, "dropping plan: {}", e);
                    None
                }
            }
        })
        .collect();

    ranked.sort_by_key(|r| (r.turns, r.index));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{DiscreteEstimator, FractionalEstimator};
    use crate::income::IncomeWeights;
    use crate::plan::piece::{PieceKind, PossiblePiece};
    use crate::resources::ResourceKind::*;

    fn plan_of(kinds: &[PieceKind]) -> BuildPlan {
        kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| PossiblePiece::at(k, i as u32))
            .collect()
    }

    #[test]
    fn fastest_plan_first() {
        let weights = IncomeWeights::from_rolls([4, 12, 6, 9, 4]);
        let est = DiscreteEstimator::new(weights);
        let plans = vec![
            plan_of(&[PieceKind::City]),
            plan_of(&[PieceKind::Road]),
            plan_of(&[PieceKind::Road, PieceKind::Settlement]),
        ];
        let ranked = rank_plans(&est, plans, &ResourceSet::EMPTY, 60, &PortFlags::NONE);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].index, 1);
        assert_eq!(ranked[0].turns, 4);
        assert!(ranked.windows(2).all(|w| w[0].turns <= w[1].turns));
    }

    #[test]
    fn unreachable_plans_are_dropped() {
        let est = FractionalEstimator::new(IncomeWeights::UNREACHABLE.with(Clay, 3).with(Wood, 3));
        let plans = vec![plan_of(&[PieceKind::City]), plan_of(&[PieceKind::Road])];
        let ranked = rank_plans(&est, plans, &ResourceSet::EMPTY, 5, &PortFlags::NONE);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].plan.peek(0).kind, PieceKind::Road);
        assert_eq!(ranked[0].turns, 3);
    }

    #[test]
    fn ties_keep_input_order() {
        let est = FractionalEstimator::new(IncomeWeights::UNREACHABLE);
        let hand = ResourceSet::EMPTY.with(Clay, 2).with(Wood, 2);
        let plans = vec![
            plan_of(&[PieceKind::Road]),
            plan_of(&[PieceKind::Road]),
            plan_of(&[PieceKind::Road, PieceKind::Road]),
        ];
        let ranked = rank_plans(&est, plans, &hand, 5, &PortFlags::NONE);
        let order: Vec<_> = ranked.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert!(ranked.iter().all(|r| r.turns == 0));
    }

    #[test]
    fn empty_plan_costs_nothing() {
        let est = DiscreteEstimator::new(IncomeWeights::UNREACHABLE);
        let ranked = rank_plans(&est, vec![BuildPlan::new()], &ResourceSet::EMPTY, 0, &PortFlags::NONE);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].turns, 0);
    }
}
