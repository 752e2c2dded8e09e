//! Batch outcome and its text log.

use super::config::BatchConfig;
use crate::error::Result;
use crate::pso::{Board, PsoConfig};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Whether the batch met its success criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// `required_successes` runs succeeded.
    Pass,
    /// `max_failures` runs failed first.
    Fail,
}

/// One successful run.
#[derive(Debug, Clone)]
pub struct RunRecord {
    /// 1-based index among successful runs.
    pub run: usize,
    /// 0-based index among all attempts.
    pub attempt: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// Epoch at which the solutions were found.
    pub epoch: usize,
    pub population_size: usize,
    pub solutions: Vec<Vec<usize>>,
}

/// Aggregated result of a batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub pso: PsoConfig,
    pub batch: BatchConfig,
    /// Successful runs, in order.
    pub runs: Vec<RunRecord>,
    pub successes: usize,
    pub failures: usize,
    /// Wall-clock duration of the whole batch.
    pub elapsed: Duration,
    pub verdict: Verdict,
}

impl BatchReport {
    /// Conventional log file name: `PSO-N{n}-{v_max}-{max_epochs}.txt`.
    pub fn log_file_name(&self) -> String {
        format!(
            "PSO-N{}-{}-{}.txt",
            self.pso.board_size, self.pso.v_max, self.pso.max_epochs
        )
    }

    /// Fraction of attempts that succeeded.
    pub fn success_rate(&self) -> f64 {
        let attempts = self.successes + self.failures;
        if attempts == 0 {
            0.0
        } else {
            self.successes as f64 / attempts as f64
        }
    }

    /// Mean duration of the successful runs.
    pub fn mean_runtime(&self) -> Option<Duration> {
        if self.runs.is_empty() {
            return None;
        }
        let total: Duration = self.runs.iter().map(|r| r.elapsed).sum();
        Some(total / self.runs.len() as u32)
    }

    /// Renders the full text log: parameters, every successful run with its
    /// boards, and the runtime summary.
    pub fn render_log(&self) -> String {
        let mut out = String::new();
        let p = &self.pso;

        // Writing to a String cannot fail.
        let _ = writeln!(out, "Particle Swarm Optimization");
        let _ = writeln!(out, "Parameters");
        let _ = writeln!(out, "N: {}", p.board_size);
        let _ = writeln!(out, "Population: {}", p.population_size);
        let _ = writeln!(out, "Max epochs: {}", p.max_epochs);
        let _ = writeln!(out, "Max velocity: {}", p.v_max);
        let _ = writeln!(out, "Min shuffles: {}", p.shuffle_min);
        let _ = writeln!(out, "Max shuffles: {}", p.shuffle_max);
        let _ = writeln!(out);

        for run in &self.runs {
            let _ = writeln!(out, "Run: {}", run.run);
            let _ = writeln!(out, "Runtime in nanoseconds: {}", run.elapsed.as_nanos());
            let _ = writeln!(out, "Found at epoch: {}", run.epoch);
            let _ = writeln!(out, "Population size: {}", run.population_size);
            let _ = writeln!(out);
            for s in &run.solutions {
                let _ = write!(out, "{}", Board::new(s));
                let _ = writeln!(out);
            }
        }

        let _ = writeln!(out, "Runtime summary");
        let _ = writeln!(out);
        for run in &self.runs {
            let _ = writeln!(out, "{}", run.elapsed.as_nanos());
        }
        let _ = writeln!(out, "Successes: {}", self.successes);
        let _ = writeln!(out, "Failures: {}", self.failures);
        let _ = writeln!(out, "Total runtime in nanoseconds: {}", self.elapsed.as_nanos());
        let _ = writeln!(
            out,
            "Verdict: {}",
            match self.verdict {
                Verdict::Pass => "PASS",
                Verdict::Fail => "FAIL",
            }
        );
        out
    }

    /// Writes [`render_log`](Self::render_log) to
    /// `dir/`[`log_file_name`](Self::log_file_name), creating `dir` if
    /// needed. Returns the written path.
    pub fn write_log(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.log_file_name());
        std::fs::write(&path, self.render_log())?;
        Ok(path)
    }
}
