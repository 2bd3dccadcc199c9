//! Ranking configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// When the iterative solver considers its ranks settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceCriterion {
    /// Largest absolute change over one full sweep is below the threshold.
    MaxSweepDelta,
    /// The last `window` per-page changes, in update order, are all below
    /// the threshold.
    TrailingDeltas { window: usize },
}

impl Default for ConvergenceCriterion {
    fn default() -> Self {
        Self::MaxSweepDelta
    }
}

/// Configuration shared by the sampler and the iterative solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Probability of following a link rather than jumping to a random page.
    /// Typically 0.85.
    pub damping: f64,
    /// Number of pages visited by the random surfer.
    pub sample_count: usize,
    /// Per-page change below which the solver stops.
    pub convergence_threshold: f64,
    /// Maximum solver sweeps before giving up.
    pub max_iterations: usize,
    pub criterion: ConvergenceCriterion,
    /// Seed for the sampler; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            sample_count: 10_000,
            convergence_threshold: 0.001,
            max_iterations: 1_000,
            criterion: ConvergenceCriterion::MaxSweepDelta,
            seed: None,
        }
    }
}

impl RankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_criterion(mut self, criterion: ConvergenceCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if self.sample_count == 0 {
            return Err(Error::InvalidConfig(
                "sample_count must be positive".to_string(),
            ));
        }
        if !(self.convergence_threshold.is_finite() && self.convergence_threshold > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "convergence_threshold must be positive, got {}",
                self.convergence_threshold
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be positive".to_string(),
            ));
        }
        if let ConvergenceCriterion::TrailingDeltas { window: 0 } = self.criterion {
            return Err(Error::InvalidConfig(
                "trailing delta window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "damping must be in (0, 1), got {damping}"
        )))
    }
}
