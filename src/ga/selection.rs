//! Parent selection.

use rand::Rng;

use crate::model::Tour;

/// Tournament selection: draw `k` individuals at random (with replacement)
/// and return the index of the cheapest.
///
/// Larger `k` means stronger selection pressure; `k = 1` is uniform random
/// selection. Ties keep the earliest draw.
///
/// # Panics
/// Panics if `population` is empty.
pub(crate) fn tournament<R: Rng>(population: &[Tour], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].cost() < population[best_idx].cost() {
            best_idx = idx;
        }
    }
    best_idx
}
