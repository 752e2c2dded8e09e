//! Batch harness configuration.

use crate::error::{PsoError, Result};
use crate::pso::PsoConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pass/fail criteria for a batch of independent runs.
///
/// ```
/// use u_swarm_queens::batch::BatchConfig;
///
/// let config = BatchConfig::default().with_base_seed(1);
/// assert_eq!(config.required_successes, 50);
/// assert_eq!(config.max_failures, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Successful runs needed for the batch to pass.
    pub required_successes: usize,

    /// Failed runs after which the batch gives up and fails.
    pub max_failures: usize,

    /// Seed of the first run; run `k` uses `base_seed + k`.
    ///
    /// Falls back to the PSO seed when `None`. With neither set, every run
    /// is seeded from OS entropy.
    pub base_seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            required_successes: 50,
            max_failures: 100,
            base_seed: None,
        }
    }
}

impl BatchConfig {
    pub fn with_required_successes(mut self, n: usize) -> Self {
        self.required_successes = n;
        self
    }

    pub fn with_max_failures(mut self, n: usize) -> Self {
        self.max_failures = n;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.required_successes == 0 {
            return Err(PsoError::InvalidConfig(
                "required_successes must be at least 1".into(),
            ));
        }
        if self.max_failures == 0 {
            return Err(PsoError::InvalidConfig(
                "max_failures must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Everything the `pso-queens` binary reads from its TOML file.
///
/// ```toml
/// log_dir = "logs"
///
/// [pso]
/// board_size = 16
/// v_max = 8.0
/// max_epochs = 10000
///
/// [batch]
/// required_successes = 50
/// max_failures = 100
/// base_seed = 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub pso: PsoConfig,
    pub batch: BatchConfig,

    /// Directory that receives the batch log. No log is written when `None`.
    pub log_dir: Option<PathBuf>,
}

impl HarnessConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validates both sections.
    pub fn validate(&self) -> Result<()> {
        self.pso.validate()?;
        self.batch.validate()
    }
}
