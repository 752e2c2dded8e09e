//! Command-line front end: single runs or pass/fail batches.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use u_swarm_queens::batch::{BatchRunner, HarnessConfig, Verdict};
use u_swarm_queens::pso::{Board, PsoRunner};

#[derive(Debug, Parser)]
#[command(name = "pso-queens", version, about = "Solve N-Queens with particle swarm optimization")]
struct Cli {
    /// TOML file with [pso] and [batch] sections.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board size N.
    #[arg(short = 'n', long)]
    board_size: Option<usize>,

    /// Number of particles.
    #[arg(short, long)]
    population: Option<usize>,

    /// Maximum velocity.
    #[arg(long)]
    v_max: Option<f64>,

    /// Epoch budget per run.
    #[arg(short, long)]
    epochs: Option<usize>,

    /// Seed for reproducible runs.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for the batch log file.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Perform one run and print its boards instead of a batch.
    #[arg(long)]
    single: bool,
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("u_swarm_queens=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            error!(event = "fatal", error = %e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> u_swarm_queens::Result<ExitCode> {
    let mut harness = match &cli.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };

    if let Some(n) = cli.board_size {
        harness.pso.board_size = n;
    }
    if let Some(p) = cli.population {
        harness.pso.population_size = p;
    }
    if let Some(v) = cli.v_max {
        harness.pso.v_max = v;
    }
    if let Some(e) = cli.epochs {
        harness.pso.max_epochs = e;
    }
    if let Some(s) = cli.seed {
        harness.pso.seed = Some(s);
    }
    if cli.log_dir.is_some() {
        harness.log_dir = cli.log_dir;
    }
    harness.validate()?;

    if cli.single {
        let result = PsoRunner::run(&harness.pso)?;
        println!(
            "{:?} after {} epochs ({} ms)",
            result.state,
            result.epochs,
            result.elapsed.as_millis()
        );
        for s in &result.solutions {
            println!("{s:?}");
            print!("{}", Board::new(s));
            println!();
        }
        return Ok(if result.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let report = BatchRunner::run(&harness.pso, &harness.batch)?;
    if let Some(dir) = &harness.log_dir {
        let path = report.write_log(dir)?;
        println!("log written to {}", path.display());
    }

    println!("Number of successes: {}", report.successes);
    println!("Number of failures: {}", report.failures);
    if let Some(mean) = report.mean_runtime() {
        println!("Mean runtime: {} ns", mean.as_nanos());
    }

    Ok(match report.verdict {
        Verdict::Pass => ExitCode::SUCCESS,
        Verdict::Fail => ExitCode::FAILURE,
    })
}
