//! Particle Swarm Optimization over queen permutations.
//!
//! Each particle is a permutation `positions[row] = column`, so rows and
//! columns never collide and only diagonal attacks count as conflicts.
//! Because permutations cannot be added to a velocity vector, a particle's
//! velocity is a scalar "pressure to change" derived from its rank, and
//! movement is a sequence of swaps toward its better-ranked neighbour.
//!
//! # Key Types
//!
//! - [`Candidate`]: one particle (placement, conflicts, velocity)
//! - [`Swarm`]: the ranked population and the per-epoch operations
//! - [`PsoConfig`]: run parameters
//! - [`SwarmOptimizer`]: the epoch loop as an explicit state machine
//! - [`PsoRunner`]: one-call entry point returning a [`PsoResult`]
//!
//! # Submodules
//!
//! - [`moves`]: exploration and exploitation swaps
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Clerc (2004), "Discrete Particle Swarm Optimization, illustrated by the
//!   Traveling Salesman Problem"

mod board;
mod candidate;
mod config;
pub mod moves;
mod runner;
mod swarm;

pub use board::Board;
pub use candidate::{is_permutation, Candidate};
pub use config::PsoConfig;
pub use runner::{PsoResult, PsoRunner, RunState, SwarmOptimizer};
pub use swarm::Swarm;
