//! Building-speed estimation.
//!
//! Answers "how many turns until this player can afford that resource set?"
//! for a player's current hand, income, and port access. Three
//! interchangeable models share one capability trait:
//!
//! - `DiscreteEstimator`: whole units on periodic turns, greedy trades.
//! - `FractionalEstimator`: continuous income and fractional trade credit.
//! - `ProbabilisticEstimator`: exact dice distribution, median turn.
//!
//! `Estimator` selects one at construction time for callers that pick the
//! model from configuration.

pub mod discrete;
pub mod fractional;
pub mod probabilistic;
pub mod trade;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::income::{IncomeModel, IncomeWeights};
use crate::plan::{PieceKind, ALL_PIECE_KINDS, PIECE_KIND_COUNT};
use crate::resources::{PortFlags, ResourceSet};

pub use discrete::DiscreteEstimator;
pub use fractional::FractionalEstimator;
pub use probabilistic::ProbabilisticEstimator;

/// Roll limit used when the caller has no better bound.
pub const DEFAULT_ROLL_LIMIT: u32 = 40;

/// Outcome of one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EstimationResult {
    /// Hand at the moment the target is first affordable. The fractional
    /// model does not simulate a hand and reports the starting one.
    pub resources: ResourceSet,
    /// Turns that must pass; zero if affordable right now.
    pub turns: u32,
}

/// The target could not be reached within the cutoff.
///
/// An expected outcome: callers treat the candidate as too far away to rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("target not reachable within {cutoff} turns")]
pub struct NonConvergence {
    pub cutoff: u32,
}

/// Advances the turn counter, or fails once `cutoff` turns have passed.
///
/// Turn `cutoff` itself is still allowed, and a `cutoff` of `u32::MAX`
/// cannot overflow the counter.
#[inline]
pub(crate) fn next_turn(turns: u32, cutoff: u32) -> Result<u32, NonConvergence> {
    if turns >= cutoff {
        Err(NonConvergence { cutoff })
    } else {
        Ok(turns + 1)
    }
}

/// Estimates turns until a target resource set is affordable.
///
/// Implementations hold only immutable income data, so one estimator can be
/// shared by any number of concurrent callers.
pub trait SpeedEstimate {
    /// Income weights the estimator was built with.
    fn weights(&self) -> IncomeWeights;

    /// Returns the turns needed to afford `target` starting from `current`,
    /// or `NonConvergence` if more than `cutoff` turns would be needed.
    fn estimate_turns(
        &self,
        current: &ResourceSet,
        target: &ResourceSet,
        cutoff: u32,
        ports: &PortFlags,
    ) -> Result<EstimationResult, NonConvergence>;
}

/// Which estimation model to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    Discrete,
    #[default]
    Fractional,
    Probabilistic,
}

impl EstimatorKind {
    /// Returns the lowercase name used in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            EstimatorKind::Discrete => "discrete",
            EstimatorKind::Fractional => "fractional",
            EstimatorKind::Probabilistic => "probabilistic",
        }
    }
}

impl FromStr for EstimatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discrete" => Ok(EstimatorKind::Discrete),
            "fractional" => Ok(EstimatorKind::Fractional),
            "probabilistic" => Ok(EstimatorKind::Probabilistic),
            other => Err(other.to_string()),
        }
    }
}

/// An estimator chosen at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Estimator {
    Discrete(DiscreteEstimator),
    Fractional(FractionalEstimator),
    Probabilistic(ProbabilisticEstimator),
}

impl Estimator {
    /// Builds the requested model from an income model.
    ///
    /// Returns `None` if a probabilistic estimator is requested from a
    /// weights-only model.
    pub fn from_model(kind: EstimatorKind, model: &IncomeModel) -> Option<Estimator> {
        match kind {
            EstimatorKind::Discrete => {
                Some(Estimator::Discrete(DiscreteEstimator::new(model.weights())))
            }
            EstimatorKind::Fractional => Some(Estimator::Fractional(FractionalEstimator::new(
                model.weights(),
            ))),
            EstimatorKind::Probabilistic => {
                ProbabilisticEstimator::from_model(model).map(Estimator::Probabilistic)
            }
        }
    }

    /// Returns which model this is.
    pub fn kind(&self) -> EstimatorKind {
        match self {
            Estimator::Discrete(_) => EstimatorKind::Discrete,
            Estimator::Fractional(_) => EstimatorKind::Fractional,
            Estimator::Probabilistic(_) => EstimatorKind::Probabilistic,
        }
    }
}

impl SpeedEstimate for Estimator {
    fn weights(&self) -> IncomeWeights {
        match self {
            Estimator::Discrete(e) => e.weights(),
            Estimator::Fractional(e) => e.weights(),
            Estimator::Probabilistic(e) => e.weights(),
        }
    }

    fn estimate_turns(
        &self,
        current: &ResourceSet,
        target: &ResourceSet,
        cutoff: u32,
        ports: &PortFlags,
    ) -> Result<EstimationResult, NonConvergence> {
        match self {
            Estimator::Discrete(e) => e.estimate_turns(current, target, cutoff, ports),
            Estimator::Fractional(e) => e.estimate_turns(current, target, cutoff, ports),
            Estimator::Probabilistic(e) => e.estimate_turns(current, target, cutoff, ports),
        }
    }
}

/// Turns needed to afford each piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceEstimates {
    turns: [u32; PIECE_KIND_COUNT],
}

impl PieceEstimates {
    /// Returns the estimate for `kind`.
    pub fn get(&self, kind: PieceKind) -> u32 {
        self.turns[kind.index()]
    }
}

/// Estimates every piece kind from the given hand.
///
/// A piece that cannot be afforded within `limit` turns is reported as `limit`.
pub fn estimates_from_now<E: SpeedEstimate + ?Sized>(
    estimator: &E,
    resources: &ResourceSet,
    ports: &PortFlags,
    limit: u32,
) -> PieceEstimates {
    let mut turns = [limit; PIECE_KIND_COUNT];
    for kind in ALL_PIECE_KINDS {
        match estimator.estimate_turns(resources, &kind.cost(), limit, ports) {
            Ok(result) => turns[kind.index()] = result.turns,
            Err(e) => tracing::trace!(piece = kind.name(), "{}", e),
        }
    }
    PieceEstimates { turns }
}

/// Estimates every piece kind from an empty hand.
pub fn estimates_from_nothing<E: SpeedEstimate + ?Sized>(
    estimator: &E,
    ports: &PortFlags,
    limit: u32,
) -> PieceEstimates {
    estimates_from_now(estimator, &ResourceSet::EMPTY, ports, limit)
}
