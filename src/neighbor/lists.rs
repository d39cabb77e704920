//! Per-point neighbor candidate lists.

use std::time::Instant;

use tracing::debug;

use super::tree::NeighborTree;
use crate::error::{Result, TspError};
use crate::model::{Instance, Metric};

/// Default number of candidates kept per point.
pub const DEFAULT_NEIGHBOR_COUNT: usize = 5;

/// Up to `k` near candidates for every point of an instance.
///
/// Lists hold point indices into the instance, nearest first, and never
/// include the owner itself. They are computed once and are unaffected by
/// any later tour mutation.
///
/// # Examples
///
/// ```
/// use u_tsp::model::{Instance, Point};
/// use u_tsp::neighbor::NeighborLists;
///
/// let instance = Instance::new(vec![
///     Point::new(1, 0.0, 0.0),
///     Point::new(2, 1.0, 0.0),
///     Point::new(3, 5.0, 0.0),
/// ]);
/// let lists = NeighborLists::build(&instance, 1);
/// assert_eq!(lists.get(0).unwrap(), &[1]);
/// assert_eq!(lists.get(2).unwrap(), &[1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborLists {
    k: usize,
    lists: Vec<Vec<usize>>,
}

impl NeighborLists {
    /// Builds the lists with one [`NeighborTree`] per point. O(n²).
    pub fn build<M: Metric>(instance: &Instance<M>, k: usize) -> Self {
        let started = Instant::now();
        let n = instance.len();
        let lists = (0..n)
            .map(|owner| NeighborTree::nearest(instance, owner, (0..n).filter(|&c| c != owner), k))
            .collect();

        debug!(
            event = "neighbor_lists_built",
            points = n,
            k = k,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Self { k, lists }
    }

    /// Builds lists of [`DEFAULT_NEIGHBOR_COUNT`] candidates.
    pub fn build_default<M: Metric>(instance: &Instance<M>) -> Self {
        Self::build(instance, DEFAULT_NEIGHBOR_COUNT)
    }

    /// Requested list size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of points covered.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` when built for an empty instance.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Candidates of `point`, nearest first.
    pub fn get(&self, point: usize) -> Result<&[usize]> {
        self.lists
            .get(point)
            .map(Vec::as_slice)
            .ok_or(TspError::IndexOutOfRange {
                index: point,
                len: self.lists.len(),
            })
    }
}
