//! PSO configuration.
//!
//! [`PsoConfig`] holds every parameter of a single swarm run.

use crate::error::{PsoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one swarm run.
///
/// # Defaults
///
/// ```
/// use u_swarm_queens::pso::PsoConfig;
///
/// let config = PsoConfig::default();
/// assert_eq!(config.board_size, 8);
/// assert_eq!(config.population_size, 40);
/// assert_eq!(config.max_epochs, 5000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_swarm_queens::pso::PsoConfig;
///
/// let config = PsoConfig::for_board(16)
///     .with_v_max(8.0)
///     .with_max_epochs(10_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoConfig {
    /// Board size N (number of queens).
    pub board_size: usize,

    /// Number of particles in the swarm. Fixed for the run.
    pub population_size: usize,

    /// Upper bound on a particle's velocity.
    ///
    /// The worst particle of each epoch moves `floor(v_max)` steps.
    /// Typical values: 4–20.
    pub v_max: f64,

    /// Epoch budget. The run is exhausted when it is spent.
    pub max_epochs: usize,

    /// Minimum number of random swaps applied to a fresh particle.
    pub shuffle_min: usize,

    /// Maximum number of random swaps applied to a fresh particle (inclusive).
    pub shuffle_max: usize,

    /// Conflict count at or below which a particle counts as a solution.
    pub target: usize,

    /// Whether to evaluate particles in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Evaluation draws no
    /// randomness, so results are identical either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            population_size: 40,
            v_max: 4.0,
            max_epochs: 5000,
            shuffle_min: 8,
            shuffle_max: 20,
            target: 0,
            parallel: false,
            seed: None,
        }
    }
}

impl PsoConfig {
    /// Default parameters for an `n`-queens board.
    pub fn for_board(n: usize) -> Self {
        Self {
            board_size: n,
            ..Self::default()
        }
    }

    /// Preset with a short epoch budget, for quick feasibility checks.
    ///
    /// - Population: 40, Epochs: 1000, V_MAX: 4
    pub fn fast(n: usize) -> Self {
        Self {
            board_size: n,
            max_epochs: 1000,
            ..Self::default()
        }
    }

    /// Preset for larger boards: more epochs and bigger moves.
    ///
    /// - Population: 40, Epochs: 50 000, V_MAX: 8
    pub fn thorough(n: usize) -> Self {
        Self {
            board_size: n,
            max_epochs: 50_000,
            v_max: 8.0,
            ..Self::default()
        }
    }

    pub fn with_board_size(mut self, n: usize) -> Self {
        self.board_size = n;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_v_max(mut self, v_max: f64) -> Self {
        self.v_max = v_max;
        self
    }

    pub fn with_max_epochs(mut self, n: usize) -> Self {
        self.max_epochs = n;
        self
    }

    /// Sets the inclusive range of initial random swaps.
    pub fn with_shuffle_range(mut self, min: usize, max: usize) -> Self {
        self.shuffle_min = min;
        self.shuffle_max = max;
        self
    }

    pub fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses a configuration from a TOML string. Missing keys take their
    /// default values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validates the configuration.
    ///
    /// Returns [`PsoError::InvalidConfig`] naming the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 {
            return Err(invalid("board_size must be at least 1"));
        }
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        if !self.v_max.is_finite() || self.v_max <= 0.0 {
            return Err(invalid(format!(
                "v_max must be finite and positive, got {}",
                self.v_max
            )));
        }
        if self.max_epochs == 0 {
            return Err(invalid("max_epochs must be at least 1"));
        }
        if self.shuffle_min > self.shuffle_max {
            return Err(invalid(format!(
                "shuffle_min ({}) must not exceed shuffle_max ({})",
                self.shuffle_min, self.shuffle_max
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> PsoError {
    PsoError::InvalidConfig(msg.into())
}
