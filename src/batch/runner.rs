//! Repeated independent runs against fixed parameters.

use super::config::BatchConfig;
use super::report::{BatchReport, RunRecord, Verdict};
use crate::error::Result;
use crate::pso::{PsoConfig, PsoRunner};
use std::time::Instant;
use tracing::{info, warn};

/// Runs fresh swarms until the pass or fail criterion is met.
pub struct BatchRunner;

impl BatchRunner {
    /// Repeats independent runs of `pso` until `batch.required_successes`
    /// of them succeed or `batch.max_failures` of them fail.
    ///
    /// # Errors
    /// Returns [`PsoError::InvalidConfig`](crate::PsoError::InvalidConfig)
    /// if either configuration is invalid.
    pub fn run(pso: &PsoConfig, batch: &BatchConfig) -> Result<BatchReport> {
        pso.validate()?;
        batch.validate()?;

        let started = Instant::now();
        let base_seed = batch.base_seed.or(pso.seed);
        let mut runs = Vec::new();
        let mut failures = 0usize;
        let mut attempt = 0usize;

        info!(
            event = "batch_start",
            board_size = pso.board_size,
            v_max = pso.v_max,
            max_epochs = pso.max_epochs,
            required_successes = batch.required_successes,
            max_failures = batch.max_failures,
        );

        while runs.len() < batch.required_successes && failures < batch.max_failures {
            let mut config = pso.clone();
            config.seed = base_seed.map(|s| s.wrapping_add(attempt as u64));

            let result = PsoRunner::run(&config)?;
            info!(
                event = "batch_run",
                attempt = attempt,
                success = result.success,
                epochs = result.epochs,
                duration_ms = result.elapsed.as_millis() as u64,
            );

            if result.success {
                runs.push(RunRecord {
                    run: runs.len() + 1,
                    attempt,
                    elapsed: result.elapsed,
                    epoch: result.epochs,
                    population_size: result.population_size,
                    solutions: result.solutions,
                });
            } else {
                failures += 1;
            }
            attempt += 1;
        }

        let successes = runs.len();
        let verdict = if successes >= batch.required_successes {
            Verdict::Pass
        } else {
            warn!(
                event = "batch_fail",
                successes = successes,
                failures = failures,
                "cannot find enough solutions with these parameters"
            );
            Verdict::Fail
        };
        let elapsed = started.elapsed();

        info!(
            event = "batch_end",
            successes = successes,
            failures = failures,
            verdict = ?verdict,
            duration_ms = elapsed.as_millis() as u64,
        );

        Ok(BatchReport {
            pso: pso.clone(),
            batch: batch.clone(),
            runs,
            successes,
            failures,
            elapsed,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PsoError;

    #[test]
    fn test_four_queens_batch_passes() {
        let pso = PsoConfig::for_board(4)
            .with_population_size(10)
            .with_max_epochs(1000);
        let batch = BatchConfig::default()
            .with_required_successes(10)
            .with_base_seed(100);

        let report = BatchRunner::run(&pso, &batch).unwrap();
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.successes, 10);
        assert_eq!(report.runs.len(), 10);
        for (i, run) in report.runs.iter().enumerate() {
            assert_eq!(run.run, i + 1);
            assert!(!run.solutions.is_empty());
            assert_eq!(run.population_size, 10);
        }
    }

    #[test]
    fn test_unsolvable_batch_fails_after_max_failures() {
        let pso = PsoConfig::for_board(3)
            .with_population_size(4)
            .with_max_epochs(10);
        let batch = BatchConfig::default()
            .with_required_successes(5)
            .with_max_failures(7)
            .with_base_seed(0);

        let report = BatchRunner::run(&pso, &batch).unwrap();
        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.successes, 0);
        assert_eq!(report.failures, 7);
        assert!(report.runs.is_empty());
    }

    #[test]
    fn test_seeded_batches_repeat() {
        let pso = PsoConfig::for_board(5).with_max_epochs(500);
        let batch = BatchConfig::default()
            .with_required_successes(3)
            .with_base_seed(9);

        let a = BatchRunner::run(&pso, &batch).unwrap();
        let b = BatchRunner::run(&pso, &batch).unwrap();
        let sols = |r: &BatchReport| {
            r.runs
                .iter()
                .map(|run| (run.attempt, run.epoch, run.solutions.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(sols(&a), sols(&b));
        assert_eq!(a.failures, b.failures);
    }

    #[test]
    fn test_rejects_invalid_batch() {
        let batch = BatchConfig::default().with_max_failures(0);
        assert!(matches!(
            BatchRunner::run(&PsoConfig::for_board(4), &batch),
            Err(PsoError::InvalidConfig(_))
        ));
    }
}
