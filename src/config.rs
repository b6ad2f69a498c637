//! Scenario configuration.
//!
//! A scenario is a JSON object describing one estimate request:
//!
//! ```json
//! {
//!   "current":   {"wheat": 4},
//!   "target":    {"clay": 1, "wood": 1},
//!   "weights":   {"clay": 4, "wood": 4},
//!   "ports":     {"misc": true},
//!   "cutoff":    40,
//!   "estimator": "discrete"
//! }
//! ```
//!
//! `plan` (a list of pieces, bottom first) may replace `target`, and
//! `numbers` (board touches, with an optional `robber` hex) may replace
//! `weights`. The probabilistic estimator and calibration need `numbers`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::estimate::{Estimator, EstimatorKind, DEFAULT_ROLL_LIMIT};
use crate::income::{IncomeModel, IncomeWeights, PlayerNumbers};
use crate::plan::BuildPlan;
use crate::resources::{PortFlags, ResourceSet};

/// Errors that can occur while loading or interpreting a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read scenario '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario has neither a target nor a plan")]
    MissingTarget,

    #[error("scenario has both a target and a plan")]
    ConflictingTarget,

    #[error("scenario has neither income weights nor board numbers")]
    MissingIncome,

    #[error("{0} needs board numbers, not just income weights")]
    NeedsNumbers(&'static str),

    #[error("unknown estimator '{0}'")]
    UnknownEstimator(String),
}

fn default_cutoff() -> u32 {
    DEFAULT_ROLL_LIMIT
}

/// One estimate request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub current: ResourceSet,
    #[serde(default)]
    pub target: Option<ResourceSet>,
    #[serde(default)]
    pub plan: Option<BuildPlan>,
    #[serde(default)]
    pub weights: Option<IncomeWeights>,
    #[serde(default)]
    pub numbers: Option<PlayerNumbers>,
    #[serde(default)]
    pub robber: Option<u16>,
    #[serde(default)]
    pub ports: PortFlags,
    #[serde(default = "default_cutoff")]
    pub cutoff: u32,
    #[serde(default)]
    pub estimator: EstimatorKind,
}

impl Scenario {
    /// Parses a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Scenario, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Scenario, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Scenario::from_json(&text)
    }

    /// The resource set to estimate: `target`, or the plan's total cost.
    pub fn target(&self) -> Result<ResourceSet, ConfigError> {
        match (&self.target, &self.plan) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingTarget),
            (Some(target), None) => Ok(*target),
            (None, Some(plan)) => Ok(plan.total_cost()),
            (None, None) => Err(ConfigError::MissingTarget),
        }
    }

    /// Builds the income model, preferring board numbers over bare weights.
    pub fn income_model(&self) -> Result<IncomeModel, ConfigError> {
        match (&self.numbers, &self.weights) {
            (Some(numbers), _) => Ok(IncomeModel::from_numbers(numbers, self.robber)),
            (None, Some(weights)) => Ok(IncomeModel::from_weights(*weights)),
            (None, None) => Err(ConfigError::MissingIncome),
        }
    }

    /// Builds the configured estimator.
    pub fn estimator(&self) -> Result<Estimator, ConfigError> {
        let model = self.income_model()?;
        Estimator::from_model(self.estimator, &model)
            .ok_or(ConfigError::NeedsNumbers("probabilistic estimator"))
    }
}
