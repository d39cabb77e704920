//! Permutation crossover and mutation operators.
//!
//! Both operate on `&[usize]` visiting orders and always produce a
//! permutation of the same elements.
//!
//! - [`slice_crossover`]: keeps a random slice of one parent in place and
//!   fills the rest in the other parent's order, O(n)
//! - [`swap_mutation`]: exchanges two random positions, O(1)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;

use crate::random::two_positions;

/// Slice crossover for permutations.
///
/// # Algorithm
///
/// 1. Select a random segment `[start, end]`
/// 2. Copy `parent1[start..=end]` to the child at the same positions
/// 3. Fill the remaining positions from left to right with the elements of
///    `parent2` in their order, skipping elements already in the child
///
/// Unlike Davis' order crossover, filling starts at position 0 rather than
/// after the segment.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Examples
///
/// ```
/// use u_tsp::ga::operators::slice_crossover_at;
///
/// let child = slice_crossover_at(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], 1, 2);
/// assert_eq!(child, vec![4, 1, 2, 3, 0]);
/// ```
pub fn slice_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    if n < 2 {
        return parent1.to_vec();
    }
    let (start, end) = random_segment(n, rng);
    slice_crossover_at(parent1, parent2, start, end)
}

/// [`slice_crossover`] with a given segment `[start, end]`.
///
/// # Panics
/// Panics if the parents differ in length or the segment is out of range.
pub fn slice_crossover_at(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(start <= end && end < n, "segment out of range");

    let mut child = vec![usize::MAX; n];
    let mut present = vec![false; n];
    for i in start..=end {
        child[i] = parent1[i];
        present[parent1[i]] = true;
    }

    let mut donor = parent2.iter().copied().filter(|&p| !present[p]);
    for (pos, slot) in child.iter_mut().enumerate() {
        if (start..=end).contains(&pos) {
            continue;
        }
        if let Some(p) = donor.next() {
            *slot = p;
        }
    }
    child
}

/// Swap mutation: exchange two random positions.
///
/// The positions may coincide, in which case nothing changes.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let (i, j) = two_positions(n, rng);
    perm.swap(i, j);
}

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let (a, b) = two_positions(n, rng);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
