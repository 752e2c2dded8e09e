//! Particle Swarm Optimization for the N-Queens puzzle.
//!
//! Places N queens on an N×N board so that no two attack each other, using
//! a swarm of permutation-encoded particles:
//!
//! - **PSO**: particles, conflict evaluation, velocity derived from rank,
//!   and swap-based movement toward better neighbours.
//! - **Batch harness**: repeated independent runs with pass/fail criteria
//!   and a text log of every solution found.
//!
//! # Quick start
//!
//! ```
//! use u_swarm_queens::pso::{Board, PsoConfig, PsoRunner};
//!
//! let config = PsoConfig::for_board(6).with_max_epochs(2000).with_seed(7);
//! let result = PsoRunner::run(&config)?;
//! if result.success {
//!     print!("{}", Board::new(&result.solutions[0]));
//! }
//! # Ok::<(), u_swarm_queens::PsoError>(())
//! ```
//!
//! Failing to converge within the epoch budget is a normal outcome and is
//! reported as `success == false`, not as an error.

pub mod batch;
pub mod error;
pub mod pso;
pub mod random;

pub use error::{PsoError, Result};
