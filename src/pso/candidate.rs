//! Permutation-encoded board placement.
//!
//! A [`Candidate`] stores one queen per row: `positions[row] = column`.
//! Rows can never collide by construction, and columns stay unique as long
//! as the placement is only changed through [`Candidate::swap_rows`].

use crate::error::{PsoError, Result};
use serde::{Deserialize, Serialize};

/// Diagonal step directions as `(row delta, column delta)`.
const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (1, 1), (-1, 1), (1, -1)];

/// One particle of the swarm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    positions: Vec<usize>,
    conflicts: usize,
    velocity: f64,
}

impl Candidate {
    /// Creates a candidate with the identity placement (all queens on the
    /// main diagonal). Conflicts are not computed.
    pub fn new(n: usize) -> Self {
        Self {
            positions: (0..n).collect(),
            conflicts: 0,
            velocity: 0.0,
        }
    }

    /// Creates a candidate from an explicit placement and computes its
    /// conflicts.
    ///
    /// # Errors
    /// Returns [`PsoError::InvalidPermutation`] if `positions` is not a
    /// permutation of `0..positions.len()`.
    pub fn from_positions(positions: Vec<usize>) -> Result<Self> {
        if !is_permutation(&positions) {
            return Err(PsoError::InvalidPermutation {
                n: positions.len(),
                positions,
            });
        }
        let mut candidate = Self {
            positions,
            conflicts: 0,
            velocity: 0.0,
        };
        candidate.compute_conflicts();
        Ok(candidate)
    }

    /// Board size N.
    pub fn board_size(&self) -> usize {
        self.positions.len()
    }

    /// Recounts diagonal attacks and stores the result.
    ///
    /// Walks the four diagonal rays from every queen to the board edge and
    /// counts each queen met on the way. An attacking pair is seen from both
    /// ends, so the count is twice the number of attacking pairs.
    pub fn compute_conflicts(&mut self) {
        let n = self.positions.len() as isize;
        let mut conflicts = 0;

        for (row, &col) in self.positions.iter().enumerate() {
            for &(dr, dc) in &DIAGONALS {
                let mut r = row as isize + dr;
                let mut c = col as isize + dc;
                while (0..n).contains(&r) && (0..n).contains(&c) {
                    if self.positions[r as usize] == c as usize {
                        conflicts += 1;
                    }
                    r += dr;
                    c += dc;
                }
            }
        }

        self.conflicts = conflicts;
    }

    /// Number of unordered queen pairs sharing a diagonal.
    pub fn attacking_pairs(&self) -> usize {
        self.conflicts / 2
    }

    /// Column of the queen in `row`.
    ///
    /// # Panics
    /// Panics if `row >= board_size()`.
    pub fn position(&self, row: usize) -> usize {
        self.positions[row]
    }

    /// Overwrites the column of the queen in `row` without any checks.
    ///
    /// Prefer [`swap_rows`](Self::swap_rows), which keeps the placement a
    /// permutation.
    ///
    /// # Panics
    /// Panics if `row >= board_size()`.
    pub fn set_position(&mut self, row: usize, column: usize) {
        self.positions[row] = column;
    }

    /// Exchanges the queen columns of two rows.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.positions.swap(a, b);
    }

    /// Row currently holding the queen in `column`, if any.
    pub fn row_of(&self, column: usize) -> Option<usize> {
        self.positions.iter().position(|&c| c == column)
    }

    /// The full placement, indexed by row.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    pub fn set_conflicts(&mut self, conflicts: usize) {
        self.conflicts = conflicts;
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    /// Whether the placement is still a permutation of `0..n`.
    pub fn is_valid(&self) -> bool {
        is_permutation(&self.positions)
    }
}

/// Checks that `positions` contains every value of `0..len` exactly once.
pub fn is_permutation(positions: &[usize]) -> bool {
    let n = positions.len();
    let mut seen = vec![false; n];
    for &p in positions {
        if p >= n || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_layout() {
        let c = Candidate::new(5);
        assert_eq!(c.positions(), &[0, 1, 2, 3, 4]);
        assert_eq!(c.board_size(), 5);
        assert_eq!(c.velocity(), 0.0);
        assert!(c.is_valid());
    }

    #[test]
    fn test_four_queens_solutions_have_no_conflicts() {
        for solution in [vec![1, 3, 0, 2], vec![2, 0, 3, 1]] {
            let c = Candidate::from_positions(solution).unwrap();
            assert_eq!(c.conflicts(), 0);
        }
    }

    #[test]
    fn test_identity_four_counts_every_pair_from_both_ends() {
        let mut c = Candidate::new(4);
        c.compute_conflicts();
        // All 4 queens share the main diagonal: C(4, 2) = 6 pairs.
        assert_eq!(c.attacking_pairs(), 6);
        assert_eq!(c.conflicts(), 12);
    }

    #[test]
    fn test_anti_diagonal_conflicts() {
        let c = Candidate::from_positions(vec![2, 1, 0]).unwrap();
        assert_eq!(c.attacking_pairs(), 3);
    }

    #[test]
    fn test_attacks_are_not_blocked() {
        // Queens at (0,0) and (2,2) attack through (1,1).
        let c = Candidate::from_positions(vec![0, 1, 2]).unwrap();
        assert_eq!(c.conflicts(), 6);
    }

    #[test]
    fn test_eight_queens_solution() {
        let c = Candidate::from_positions(vec![0, 4, 7, 5, 2, 6, 1, 3]).unwrap();
        assert_eq!(c.conflicts(), 0);
    }

    #[test]
    fn test_brute_force_agreement() {
        let placement = vec![3, 0, 4, 1, 5, 2];
        let c = Candidate::from_positions(placement.clone()).unwrap();
        let mut pairs = 0;
        for i in 0..placement.len() {
            for j in (i + 1)..placement.len() {
                if placement[i].abs_diff(placement[j]) == j - i {
                    pairs += 1;
                }
            }
        }
        assert_eq!(c.attacking_pairs(), pairs);
    }

    #[test]
    fn test_single_queen() {
        let c = Candidate::from_positions(vec![0]).unwrap();
        assert_eq!(c.conflicts(), 0);
    }

    #[test]
    fn test_rejects_non_permutation() {
        assert!(matches!(
            Candidate::from_positions(vec![0, 0, 1]),
            Err(PsoError::InvalidPermutation { n: 3, .. })
        ));
        assert!(Candidate::from_positions(vec![0, 3]).is_err());
    }

    #[test]
    fn test_swap_and_lookup() {
        let mut c = Candidate::new(4);
        c.swap_rows(0, 3);
        assert_eq!(c.positions(), &[3, 1, 2, 0]);
        assert_eq!(c.row_of(3), Some(0));
        assert_eq!(c.row_of(7), None);
        assert!(c.is_valid());
    }

    #[test]
    fn test_raw_mutators() {
        let mut c = Candidate::new(3);
        c.set_position(0, 2);
        assert_eq!(c.position(0), 2);
        assert!(!c.is_valid());
        c.set_conflicts(9);
        c.set_velocity(1.5);
        assert_eq!(c.conflicts(), 9);
        assert!((c.velocity() - 1.5).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_row_panics() {
        let c = Candidate::new(3);
        c.position(3);
    }
}
