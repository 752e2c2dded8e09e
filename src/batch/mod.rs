//! Batch test harness.
//!
//! Drives repeated independent swarm runs against fixed parameters until a
//! pass criterion (enough successes) or a fail criterion (too many
//! failures) is met, then renders a text log of the outcome.
//!
//! # Key Types
//!
//! - [`BatchConfig`]: pass/fail criteria and seeding
//! - [`HarnessConfig`]: TOML file layout for the `pso-queens` binary
//! - [`BatchRunner`]: the repeat loop
//! - [`BatchReport`]: per-run records, counts, verdict, log rendering

mod config;
mod report;
mod runner;

pub use config::{BatchConfig, HarnessConfig};
pub use report::{BatchReport, RunRecord, Verdict};
pub use runner::BatchRunner;
