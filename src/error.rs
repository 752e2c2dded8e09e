//! Error types for the swarm solver.

use thiserror::Error;

/// Errors produced while configuring or driving a swarm run.
///
/// A run that fails to converge is *not* an error: it is reported through
/// [`PsoResult::success`](crate::pso::PsoResult::success).
#[derive(Debug, Error)]
pub enum PsoError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An optimizer operation was called in a state that does not allow it.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A board placement is not a permutation of `0..n`.
    #[error("not a permutation of 0..{n}: {positions:?}")]
    InvalidPermutation {
        /// Board size the placement was checked against.
        n: usize,
        /// The offending placement.
        positions: Vec<usize>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for swarm operations.
pub type Result<T> = std::result::Result<T, PsoError>;
