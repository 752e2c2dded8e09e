//! Run-scoped random number generation.
//!
//! Every run owns exactly one generator. Seeding it makes the whole run
//! reproducible, because nothing else in the crate draws randomness.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The generator type used by the optimizer when none is supplied.
pub type PsoRng = ChaCha8Rng;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> PsoRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> PsoRng {
    create_rng(seed.unwrap_or_else(rand::random))
}

/// Uniform integer in the inclusive range `[low, high]`.
///
/// # Panics
/// Panics if `low > high`.
pub fn inclusive_range<R: Rng>(low: usize, high: usize, rng: &mut R) -> usize {
    rng.random_range(low..=high)
}

/// Uniform index in `0..n`, excluding `except`.
///
/// Draws from the `n - 1` remaining indices directly instead of rejecting,
/// so the cost is constant.
///
/// # Panics
/// Panics if `n < 2` or `except >= n`.
pub fn index_except<R: Rng>(n: usize, except: usize, rng: &mut R) -> usize {
    assert!(n >= 2, "need at least two indices to exclude one");
    assert!(except < n, "excluded index {except} out of range 0..{n}");
    let pick = rng.random_range(0..n - 1);
    if pick >= except {
        pick + 1
    } else {
        pick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..100 {
            assert_eq!(a.random_range(0..1000usize), b.random_range(0..1000usize));
        }
    }

    #[test]
    fn test_inclusive_range_hits_both_ends() {
        let mut rng = create_rng(42);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..1000 {
            let v = inclusive_range(8, 10, &mut rng);
            assert!((8..=10).contains(&v));
            seen_low |= v == 8;
            seen_high |= v == 10;
        }
        assert!(seen_low && seen_high, "both bounds should be reachable");
    }

    #[test]
    fn test_inclusive_range_degenerate() {
        let mut rng = create_rng(42);
        assert_eq!(inclusive_range(5, 5, &mut rng), 5);
    }

    #[test]
    fn test_index_except_never_returns_excluded() {
        let mut rng = create_rng(42);
        let mut counts = [0usize; 6];
        for _ in 0..6000 {
            let v = index_except(6, 2, &mut rng);
            counts[v] += 1;
        }
        assert_eq!(counts[2], 0);
        // The last index must stay reachable.
        assert!(counts[5] > 0);
        for (i, &c) in counts.iter().enumerate() {
            if i != 2 {
                assert!(c > 900, "index {i} drawn only {c} times");
            }
        }
    }

    #[test]
    fn test_index_except_two_elements() {
        let mut rng = create_rng(1);
        for _ in 0..50 {
            assert_eq!(index_except(2, 0, &mut rng), 1);
            assert_eq!(index_except(2, 1, &mut rng), 0);
        }
    }

    #[test]
    #[should_panic]
    fn test_index_except_single_element_panics() {
        let mut rng = create_rng(1);
        index_except(1, 0, &mut rng);
    }
}
