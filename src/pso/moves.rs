//! Permutation moves used to steer particles.
//!
//! Board placements are permutations, so there is no vector arithmetic to
//! add a velocity to. Movement is expressed as a number of swap steps
//! instead, each of which keeps the placement a permutation.
//!
//! # Moves
//!
//! - [`scramble`]: a fixed number of random swaps, used at initialization
//! - [`explore`]: one random swap of two distinct rows
//! - [`exploit`]: one directed swap that copies a local adjacency from a
//!   better-ranked particle

use super::candidate::Candidate;
use crate::random::index_except;
use rand::Rng;

/// Applies `swaps` exploration steps.
pub fn scramble<R: Rng>(candidate: &mut Candidate, swaps: usize, rng: &mut R) {
    for _ in 0..swaps {
        explore(candidate, rng);
    }
}

/// Exploration step: swap the queens of two distinct random rows.
///
/// No-op on boards smaller than 2.
pub fn explore<R: Rng>(candidate: &mut Candidate, rng: &mut R) {
    let n = candidate.board_size();
    if n < 2 {
        return;
    }
    let a = rng.random_range(0..n);
    let b = index_except(n, a, rng);
    candidate.swap_rows(a, b);
}

/// Exploitation step: pull `destination` one swap closer to `source`.
///
/// A random column value is picked as the anchor; see [`exploit_toward`]
/// for the move itself.
pub fn exploit<R: Rng>(source: &Candidate, destination: &mut Candidate, rng: &mut R) {
    let n = destination.board_size();
    if n == 0 {
        return;
    }
    let anchor = rng.random_range(0..n);
    exploit_toward(source, destination, anchor);
}

/// Deterministic core of [`exploit`].
///
/// Let `follower` be the value that comes right after `anchor` in `source`,
/// reading rows circularly. In `destination`, the value in the row after
/// `anchor` (again circularly) is swapped with `follower`, so `follower`
/// ends up adjacent to `anchor` exactly as it is in `source`.
///
/// # Panics
/// Panics if either placement is not a permutation of the same `0..n`.
pub fn exploit_toward(source: &Candidate, destination: &mut Candidate, anchor: usize) {
    let n = destination.board_size();
    assert_eq!(source.board_size(), n, "particles must share a board size");

    let source_row = source
        .row_of(anchor)
        .expect("source placement must be a permutation");
    let follower = source.position((source_row + 1) % n);

    let index_a = destination
        .row_of(anchor)
        .expect("destination placement must be a permutation");
    let index_b = destination
        .row_of(follower)
        .expect("destination placement must be a permutation");

    destination.swap_rows((index_a + 1) % n, index_b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn candidate(positions: &[usize]) -> Candidate {
        Candidate::from_positions(positions.to_vec()).unwrap()
    }

    // ---- Exploration ----

    #[test]
    fn test_explore_always_changes_two_rows() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut c = Candidate::new(6);
            explore(&mut c, &mut rng);
            let moved = c
                .positions()
                .iter()
                .enumerate()
                .filter(|&(i, &v)| i != v)
                .count();
            assert_eq!(moved, 2);
            assert!(c.is_valid());
        }
    }

    #[test]
    fn test_explore_small_boards() {
        let mut rng = create_rng(42);
        let mut single = Candidate::new(1);
        explore(&mut single, &mut rng);
        assert_eq!(single.positions(), &[0]);

        let mut pair = Candidate::new(2);
        explore(&mut pair, &mut rng);
        assert_eq!(pair.positions(), &[1, 0]);
    }

    #[test]
    fn test_scramble_zero_swaps_is_identity() {
        let mut rng = create_rng(42);
        let mut c = Candidate::new(8);
        scramble(&mut c, 0, &mut rng);
        assert_eq!(c.positions(), Candidate::new(8).positions());
    }

    // ---- Exploitation ----

    #[test]
    fn test_exploit_wraps_in_source() {
        // In the source, 2 sits on the last row, so its follower is row 0's 1.
        let source = candidate(&[1, 3, 0, 2]);
        let mut dest = candidate(&[0, 1, 2, 3]);
        exploit_toward(&source, &mut dest, 2);
        assert_eq!(dest.positions(), &[0, 3, 2, 1]);
    }

    #[test]
    fn test_exploit_moves_follower_next_to_anchor() {
        let source = candidate(&[1, 3, 0, 2]);
        let mut dest = candidate(&[0, 1, 2, 3]);
        exploit_toward(&source, &mut dest, 1);
        assert_eq!(dest.positions(), &[0, 1, 3, 2]);
    }

    #[test]
    fn test_exploit_wraps_in_destination() {
        // 3 is followed by 0 in the source; in the destination 3 is on the
        // last row and 0 is already on row 0, so the swap is a no-op.
        let source = candidate(&[1, 3, 0, 2]);
        let mut dest = candidate(&[0, 1, 2, 3]);
        exploit_toward(&source, &mut dest, 3);
        assert_eq!(dest.positions(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_exploit_identical_particles_is_noop() {
        let source = candidate(&[2, 0, 3, 1]);
        for anchor in 0..4 {
            let mut dest = source.clone();
            exploit_toward(&source, &mut dest, anchor);
            assert_eq!(dest.positions(), source.positions());
        }
    }

    #[test]
    fn test_exploit_single_queen() {
        let source = candidate(&[0]);
        let mut dest = candidate(&[0]);
        let mut rng = create_rng(3);
        exploit(&source, &mut dest, &mut rng);
        assert_eq!(dest.positions(), &[0]);
    }

    #[test]
    fn test_repeated_exploit_stays_valid() {
        let source = candidate(&[4, 1, 5, 0, 2, 3]);
        let mut dest = candidate(&[0, 1, 2, 3, 4, 5]);
        let mut rng = create_rng(9);
        for _ in 0..500 {
            exploit(&source, &mut dest, &mut rng);
            assert!(dest.is_valid());
        }
    }

    #[test]
    #[should_panic]
    fn test_exploit_rejects_broken_destination() {
        let source = candidate(&[1, 3, 0, 2]);
        let mut dest = Candidate::new(4);
        dest.set_position(3, 0);
        exploit_toward(&source, &mut dest, 3);
    }

    // ---- Invariants ----

    fn permutation(max_n: usize) -> impl Strategy<Value = Vec<usize>> {
        (1..=max_n).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
    }

    proptest! {
        #[test]
        fn prop_explore_keeps_permutation(p in permutation(12), seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let mut c = candidate(&p);
            explore(&mut c, &mut rng);
            prop_assert!(c.is_valid());
        }

        #[test]
        fn prop_exploit_keeps_permutation(
            pair in (1usize..=12).prop_flat_map(|n| {
                let base: Vec<usize> = (0..n).collect();
                (Just(base.clone()).prop_shuffle(), Just(base).prop_shuffle(), 0..n)
            })
        ) {
            let (src, dst, anchor) = pair;
            let source = candidate(&src);
            let mut dest = candidate(&dst);
            exploit_toward(&source, &mut dest, anchor);
            prop_assert!(dest.is_valid());

            // The follower of `anchor` in the source now follows it in dest.
            let n = src.len();
            let follower = source.position((source.row_of(anchor).unwrap() + 1) % n);
            let ia = dest.row_of(anchor).unwrap();
            prop_assert_eq!(dest.position((ia + 1) % n), follower);
        }

        #[test]
        fn prop_scramble_keeps_permutation(n in 1usize..16, swaps in 0usize..40, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let mut c = Candidate::new(n);
            scramble(&mut c, swaps, &mut rng);
            prop_assert!(c.is_valid());
        }
    }
}
