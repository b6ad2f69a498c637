//! Fractional speed estimate.
//!
//! Income accrues as `1 / w` of a unit every turn instead of one unit every
//! `w` turns, and trading is measured as a running pool of fractional trade
//! credit rather than simulated card by card. Every holding and every income
//! source then moves the estimate, where the discrete model lets a single
//! slow resource hide the rest.
//!
//! Turn zero still counts whole trades only, since that is what the player
//! could actually do right now. Partial trade credit, including cards of
//! unknown kind valued at the worst ratio, becomes usable from turn one.
//!
//! The result counts turns of accrual only: a road with clay and wood both
//! at weight 4 takes 4 turns, and no result exceeds `cutoff`.

use crate::income::IncomeWeights;
use crate::resources::{PortFlags, ResourceKind, ResourceSet, TRADEABLE, TRADEABLE_COUNT};

use super::{next_turn, EstimationResult, NonConvergence, SpeedEstimate};

/// Slack for comparing accumulated float sums against the shortfall.
const EPSILON: f64 = 1e-9;

/// Continuous income and trade model. Reports timing only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionalEstimator {
    weights: IncomeWeights,
}

impl FractionalEstimator {
    /// Creates an estimator for the given income.
    pub fn new(weights: IncomeWeights) -> Self {
        FractionalEstimator { weights }
    }

    /// Fraction of a unit of `kind` gained per turn.
    #[inline]
    fn per_turn(&self, kind: ResourceKind) -> f64 {
        match self.weights.rolls(kind) {
            // Malformed input; treat as one per turn.
            0 => 1.0,
            rolls => 1.0 / rolls as f64,
        }
    }
}

/// Returns true while the shortfall is still larger than the trade credit.
#[inline]
fn short(total_needed: f64, total_tradable: f64) -> bool {
    total_needed > total_tradable + EPSILON
}

impl SpeedEstimate for FractionalEstimator {
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
        let mut ratio = [0.0f64; TRADEABLE_COUNT];
        let mut income = [0.0f64; TRADEABLE_COUNT];
        let mut needed = [0.0f64; TRADEABLE_COUNT];
        let mut total_needed = 0.0;
        let mut total_tradable = 0.0;
        let mut future_tradable = 0.0;

        for kind in TRADEABLE {
            let i = kind.index();
            let whole_ratio = ports.trade_ratio(kind);
            ratio[i] = whole_ratio as f64;
            income[i] = self.per_turn(kind);

            let shortfall = current.shortfall(target, kind);
            needed[i] = shortfall as f64;
            total_needed += shortfall as f64;

            let surplus = current.surplus(target, kind);
            total_tradable += (surplus / whole_ratio) as f64;
            future_tradable += (surplus % whole_ratio) as f64 / ratio[i];
        }
        future_tradable += current.amount(ResourceKind::Unknown) as f64 / ports.worst_ratio() as f64;

        let mut turns = 0;
        if !short(total_needed, total_tradable) {
            return Ok(EstimationResult {
                resources: *current,
                turns,
            });
        }

        total_tradable += future_tradable;
        loop {
            turns = next_turn(turns, cutoff)?;

            for kind in TRADEABLE {
                let i = kind.index();
                let mut earned = income[i];
                if needed[i] > 0.0 {
                    let used = needed[i].min(earned);
                    needed[i] -= used;
                    total_needed -= used;
                    earned -= used;
                }
                total_tradable += earned / ratio[i];
            }

            if !short(total_needed, total_tradable) {
                break;
            }
        }

        Ok(EstimationResult {
            resources: *current,
            turns,
        })
    }
}
