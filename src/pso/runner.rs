//! Swarm epoch loop.
//!
//! [`SwarmOptimizer`] drives one run through an explicit state machine:
//!
//! ```text
//! Idle --initialize--> Running --step--> Running
//!                              \--step--> Solved | Exhausted
//! ```
//!
//! Each [`step`](SwarmOptimizer::step) is one epoch:
//! evaluate → rank → derive velocity → update positions.

use super::config::PsoConfig;
use super::swarm::Swarm;
use crate::error::{PsoError, Result};
use crate::random::{rng_from_seed, PsoRng};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Lifecycle of a run. `Solved` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Created, swarm not yet built.
    Idle,
    /// Swarm built, epochs in progress.
    Running,
    /// A particle reached the target conflict count.
    Solved,
    /// The epoch budget ran out without reaching the target.
    Exhausted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Solved | RunState::Exhausted)
    }
}

/// Result of a swarm run.
#[derive(Debug, Clone)]
pub struct PsoResult {
    /// Whether at least one solution was found.
    pub success: bool,

    /// Placements of every particle at or below the target when the run
    /// stopped. Empty on failure.
    pub solutions: Vec<Vec<usize>>,

    /// Epochs fully executed (update passes).
    pub epochs: usize,

    /// Number of particles at the end of the run.
    pub population_size: usize,

    /// Terminal state.
    pub state: RunState,

    /// Placement of the best particle.
    pub best: Vec<usize>,

    /// Conflicts of the best particle.
    pub best_conflicts: usize,

    /// Best conflict count observed at the start of each epoch, plus the
    /// final evaluation.
    pub conflict_history: Vec<usize>,

    /// Wall-clock time from initialization to termination.
    pub elapsed: Duration,
}

/// One swarm run. Owns the swarm and the random generator exclusively.
///
/// # Usage
///
/// ```
/// use u_swarm_queens::pso::{PsoConfig, RunState, SwarmOptimizer};
///
/// let config = PsoConfig::for_board(6).with_seed(3);
/// let mut optimizer = SwarmOptimizer::new(config).unwrap();
/// optimizer.initialize().unwrap();
/// while !optimizer.state().is_terminal() {
///     optimizer.step().unwrap();
/// }
/// let result = optimizer.finish().unwrap();
/// assert_eq!(result.success, result.state == RunState::Solved);
/// ```
pub struct SwarmOptimizer<R: Rng = PsoRng> {
    config: PsoConfig,
    rng: R,
    swarm: Swarm,
    epoch: usize,
    state: RunState,
    history: Vec<usize>,
    started: Option<Instant>,
}

impl SwarmOptimizer<PsoRng> {
    /// Creates an idle optimizer seeded from `config.seed`.
    ///
    /// # Errors
    /// Returns [`PsoError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: PsoConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SwarmOptimizer<R> {
    /// Creates an idle optimizer drawing from `rng`. `config.seed` is
    /// ignored.
    pub fn with_rng(config: PsoConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            swarm: Swarm::from_candidates(Vec::new()),
            epoch: 0,
            state: RunState::Idle,
            history: Vec::new(),
            started: None,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Epochs fully executed so far.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Builds the randomized swarm. `Idle → Running`.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != RunState::Idle {
            return Err(PsoError::InvalidState(format!(
                "initialize requires Idle, run is {:?}",
                self.state
            )));
        }

        let c = &self.config;
        info!(
            event = "run_start",
            board_size = c.board_size,
            population_size = c.population_size,
            v_max = c.v_max,
            max_epochs = c.max_epochs,
            shuffle_min = c.shuffle_min,
            shuffle_max = c.shuffle_max,
            target = c.target,
        );

        self.started = Some(Instant::now());
        self.swarm = Swarm::initialize(
            c.board_size,
            c.population_size,
            c.shuffle_min,
            c.shuffle_max,
            &mut self.rng,
        );
        self.state = RunState::Running;
        Ok(())
    }

    /// Runs one epoch and returns the resulting state.
    ///
    /// The target check happens on freshly evaluated particles before any
    /// of them move, so a solved swarm is never disturbed. The budget check
    /// follows it, so a particle that reaches the target during the last
    /// update pass is still reported.
    pub fn step(&mut self) -> Result<RunState> {
        if self.state != RunState::Running {
            return Err(PsoError::InvalidState(format!(
                "step requires Running, run is {:?}",
                self.state
            )));
        }

        // Conflicts are fresh from initialization on the first epoch.
        if self.epoch > 0 {
            self.swarm.evaluate(self.config.parallel);
        }

        let best = self.swarm.best().map_or(0, |c| c.conflicts());
        self.history.push(best);

        if self.swarm.any_within(self.config.target) {
            self.state = RunState::Solved;
            return Ok(self.state);
        }
        if self.epoch >= self.config.max_epochs {
            self.state = RunState::Exhausted;
            return Ok(self.state);
        }

        self.swarm.rank();
        self.swarm.derive_velocities(self.config.v_max);
        self.swarm.update_positions(&mut self.rng);
        self.epoch += 1;

        trace!(
            event = "epoch",
            epoch = self.epoch,
            best_conflicts = best,
            worst_conflicts = self.swarm.last().map_or(0, |c| c.conflicts()),
        );

        Ok(self.state)
    }

    /// Collects the outcome of a terminated run.
    pub fn finish(self) -> Result<PsoResult> {
        if !self.state.is_terminal() {
            return Err(PsoError::InvalidState(format!(
                "finish requires a terminal state, run is {:?}",
                self.state
            )));
        }

        let target = self.config.target;
        let solutions = self.swarm.solutions(target);
        let (best, best_conflicts) = self
            .swarm
            .best()
            .map(|c| (c.positions().to_vec(), c.conflicts()))
            .unwrap_or_default();
        let elapsed = self.started.map(|t| t.elapsed()).unwrap_or_default();

        for s in &solutions {
            debug!(event = "solution", epoch = self.epoch, positions = ?s);
        }
        info!(
            event = "run_end",
            state = ?self.state,
            epochs = self.epoch,
            solutions = solutions.len(),
            best_conflicts = best_conflicts,
            duration_ms = elapsed.as_millis() as u64,
        );

        Ok(PsoResult {
            success: !solutions.is_empty(),
            solutions,
            epochs: self.epoch,
            population_size: self.swarm.len(),
            state: self.state,
            best,
            best_conflicts,
            conflict_history: self.history,
            elapsed,
        })
    }

    /// Initializes if needed, steps until a terminal state, and finishes.
    pub fn run(mut self) -> Result<PsoResult> {
        if self.state == RunState::Idle {
            self.initialize()?;
        }
        while !self.state.is_terminal() {
            self.step()?;
        }
        self.finish()
    }
}

/// Executes a complete swarm run.
///
/// # Usage
///
/// ```
/// use u_swarm_queens::pso::{PsoConfig, PsoRunner};
///
/// let config = PsoConfig::for_board(4)
///     .with_population_size(10)
///     .with_max_epochs(1000)
///     .with_seed(42);
/// let result = PsoRunner::run(&config).unwrap();
/// assert!(result.success);
/// ```
pub struct PsoRunner;

impl PsoRunner {
    /// Runs the swarm with the configuration's seed.
    ///
    /// # Errors
    /// Returns [`PsoError::InvalidConfig`] if the configuration is invalid.
    /// Failure to converge is reported through [`PsoResult::success`].
    pub fn run(config: &PsoConfig) -> Result<PsoResult> {
        SwarmOptimizer::new(config.clone())?.run()
    }

    /// Runs the swarm drawing from a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(config: &PsoConfig, rng: R) -> Result<PsoResult> {
        SwarmOptimizer::with_rng(config.clone(), rng)?.run()
    }
}

// ============================================================================
// Tests
// ============================================================================
