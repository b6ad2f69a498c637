//! Monte Carlo calibration of the estimators.
//!
//! Plays out a scenario many times with real dice rolls, trading greedily
//! after every roll, and compares the observed turn counts with what each
//! estimator predicts. Robber moves, discards, and development cards are not
//! simulated; a seven simply pays nothing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{ConfigError, Scenario};
use crate::estimate::next_turn;
use crate::estimate::trade::trade_pass;
use crate::estimate::{
    DiscreteEstimator, FractionalEstimator, ProbabilisticEstimator, SpeedEstimate,
};
use crate::income::{IncomeWeights, MAX_ROLL};
use crate::resources::{PortFlags, ResourceSet};

/// Errors from a calibration run.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a calibration run.
#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    /// Number of simulated play-outs.
    pub trials: usize,
    /// Worker threads; 1 runs on the calling thread.
    pub threads: usize,
    /// Random seed (0 = use entropy). Trial `i` uses `seed + i`, so results
    /// do not depend on the thread count.
    pub seed: u64,
    /// Suppress progress logging.
    pub quiet: bool,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        CalibrationConfig {
            trials: 1000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Observed play-outs next to each estimator's prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationReport {
    pub trials: usize,
    pub converged: usize,
    pub non_converged: usize,
    /// Mean turns over converged trials.
    pub mean_turns: Option<f64>,
    /// Lower median turns over converged trials.
    pub median_turns: Option<u32>,
    pub discrete: Option<u32>,
    pub fractional: Option<u32>,
    pub probabilistic: Option<u32>,
}

/// Rolls two six-sided dice.
pub fn roll_dice<R: Rng>(rng: &mut R) -> usize {
    rng.gen_range(1..=6) + rng.gen_range(1..=6)
}

/// Plays one scenario out with random dice.
///
/// Returns the turn on which `target` was first affordable, or `None` past
/// `cutoff`.
pub fn simulate_turns<R: Rng>(
    per_roll: &[ResourceSet; MAX_ROLL + 1],
    weights: &IncomeWeights,
    current: &ResourceSet,
    target: &ResourceSet,
    ports: &PortFlags,
    cutoff: u32,
    rng: &mut R,
) -> Option<u32> {
    let mut resources = *current;
    let mut turns = 0;

    if !resources.contains(target) {
        trade_pass(&mut resources, target, weights, ports);
    }

    while !resources.contains(target) {
        turns = next_turn(turns, cutoff).ok()?;
        resources += &per_roll[roll_dice(rng)];
        if !resources.contains(target) {
            trade_pass(&mut resources, target, weights, ports);
        }
    }
    Some(turns)
}

fn trial_rng(seed: u64, trial: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(trial as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Runs `config.trials` play-outs of `scenario` and summarises them.
pub fn run_calibration(
    config: &CalibrationConfig,
    scenario: &Scenario,
) -> Result<CalibrationReport, CalibrationError> {
    let target = scenario.target()?;
    let model = scenario.income_model()?;
    let per_roll = *model
        .per_roll()
        .ok_or(ConfigError::NeedsNumbers("calibration"))?;
    let weights = model.weights();

    let start = Instant::now();
    let completed = AtomicUsize::new(0);
    let progress_every = (config.trials / 10).max(1);

    let run_trial = |i: usize| {
        let mut rng = trial_rng(config.seed, i);
        let outcome = simulate_turns(
            &per_roll,
            &weights,
            &scenario.current,
            &target,
            &scenario.ports,
            scenario.cutoff,
            &mut rng,
        );
        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
        if !config.quiet && n % progress_every == 0 {
            tracing::info!(
                "trial {}/{} ({:.1}s)",
                n,
                config.trials,
                start.elapsed().as_secs_f64()
            );
        }
        outcome
    };

    let outcomes: Vec<Option<u32>> = if config.threads > 1 {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        pool.install(|| (0..config.trials).into_par_iter().map(run_trial).collect())
    } else {
        (0..config.trials).map(run_trial).collect()
    };

    let mut turns: Vec<u32> = outcomes.into_iter().flatten().collect();
    turns.sort_unstable();

    let converged = turns.len();
    let mean_turns = if converged > 0 {
        Some(turns.iter().map(|&t| t as f64).sum::<f64>() / converged as f64)
    } else {
        None
    };
    let median_turns = turns.get(converged.saturating_sub(1) / 2).copied();

    Ok(CalibrationReport {
        trials: config.trials,
        converged,
        non_converged: config.trials - converged,
        mean_turns,
        median_turns,
        discrete: predicted_turns(&DiscreteEstimator::new(weights), scenario, &target),
        fractional: predicted_turns(&FractionalEstimator::new(weights), scenario, &target),
        probabilistic: predicted_turns(
            &ProbabilisticEstimator::new(weights, per_roll),
            scenario,
            &target,
        ),
    })
}

fn predicted_turns<E: SpeedEstimate>(
    estimator: &E,
    scenario: &Scenario,
    target: &ResourceSet,
) -> Option<u32> {
    estimator
        .estimate_turns(&scenario.current, target, scenario.cutoff, &scenario.ports)
        .ok()
        .map(|r| r.turns)
}
