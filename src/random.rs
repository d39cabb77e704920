//! Random number helpers shared by the stochastic strategies.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates the generator for one run.
///
/// `Some(seed)` gives a reproducible stream; `None` draws a fresh seed.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

/// Returns a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Draws two positions in `0..n`, independently and uniformly.
///
/// The positions may coincide. Requires `n > 0`.
pub(crate) fn two_positions<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    (rng.random_range(0..n), rng.random_range(0..n))
}
