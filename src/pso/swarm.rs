//! The ranked particle population.

use super::candidate::Candidate;
use super::moves::{exploit, explore, scramble};
use crate::random::inclusive_range;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Ordered sequence of particles, best first once [`rank`](Self::rank) has
/// been called.
#[derive(Debug, Clone)]
pub struct Swarm {
    candidates: Vec<Candidate>,
}

impl Swarm {
    /// Builds `population_size` particles on an `n`×`n` board.
    ///
    /// Each particle starts from the identity placement, receives a number of
    /// random swaps drawn uniformly from `[shuffle_min, shuffle_max]`, and
    /// has its conflicts computed.
    pub fn initialize<R: Rng>(
        n: usize,
        population_size: usize,
        shuffle_min: usize,
        shuffle_max: usize,
        rng: &mut R,
    ) -> Self {
        let candidates = (0..population_size)
            .map(|_| {
                let mut c = Candidate::new(n);
                let swaps = inclusive_range(shuffle_min, shuffle_max, rng);
                scramble(&mut c, swaps, rng);
                c.compute_conflicts();
                c
            })
            .collect();
        Self { candidates }
    }

    /// Wraps existing particles. Their order is kept as given.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Recomputes every particle's conflicts.
    ///
    /// Draws no randomness, so the parallel path produces exactly the same
    /// state as the sequential one.
    pub fn evaluate(&mut self, parallel: bool) {
        #[cfg(feature = "parallel")]
        {
            if parallel {
                self.candidates
                    .par_iter_mut()
                    .for_each(|c| c.compute_conflicts());
                return;
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        for c in &mut self.candidates {
            c.compute_conflicts();
        }
    }

    /// Whether any particle has at most `target` conflicts.
    pub fn any_within(&self, target: usize) -> bool {
        self.candidates.iter().any(|c| c.conflicts() <= target)
    }

    /// Placements of every particle with at most `target` conflicts, in
    /// swarm order.
    pub fn solutions(&self, target: usize) -> Vec<Vec<usize>> {
        self.candidates
            .iter()
            .filter(|c| c.conflicts() <= target)
            .map(|c| c.positions().to_vec())
            .collect()
    }

    /// Stable sort by ascending conflicts. Ties keep their relative order.
    pub fn rank(&mut self) {
        self.candidates.sort_by_key(Candidate::conflicts);
    }

    /// Particle with the fewest conflicts.
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.iter().min_by_key(|c| c.conflicts())
    }

    /// Last particle in swarm order (the worst after ranking).
    pub fn last(&self) -> Option<&Candidate> {
        self.candidates.last()
    }

    /// Assigns `v = v_max * conflicts / worst`, clamped to `[0, v_max]`,
    /// where `worst` is the conflict count of the last particle.
    ///
    /// Must be called on a ranked swarm. Returns `false` and leaves every
    /// velocity untouched when `worst` is zero.
    pub fn derive_velocities(&mut self, v_max: f64) -> bool {
        let worst = match self.candidates.last() {
            Some(c) if c.conflicts() > 0 => c.conflicts() as f64,
            _ => return false,
        };
        for c in &mut self.candidates {
            let v = v_max * c.conflicts() as f64 / worst;
            c.set_velocity(v.clamp(0.0, v_max));
        }
        true
    }

    /// Moves every particle except the best toward its better neighbour.
    ///
    /// Walks ranks `1..len` in order. The particle at rank `i - 1` is the
    /// movement target for rank `i`, and it has already moved this epoch
    /// when `i > 1`. Each particle takes `floor(velocity)` steps; a step is
    /// an exploration swap with probability one half, always followed by an
    /// exploitation swap. Conflicts are recomputed after the last step.
    pub fn update_positions<R: Rng>(&mut self, rng: &mut R) {
        for i in 1..self.candidates.len() {
            let (better, rest) = self.candidates.split_at_mut(i);
            let source = &better[i - 1];
            let destination = &mut rest[0];

            let changes = destination.velocity().abs().floor() as usize;
            for _ in 0..changes {
                if rng.random_bool(0.5) {
                    explore(destination, rng);
                }
                exploit(source, destination, rng);
            }

            destination.compute_conflicts();
        }
    }
}
