//! Greedy nearest-neighbor construction.

use tracing::debug;

use crate::error::{Result, TspError};
use crate::model::{Instance, Metric, Tour};

/// Nearest-neighbor tour construction.
///
/// Starting from one point, repeatedly appends the closest point not yet
/// placed, then closes the tour back to the start. Candidates are scanned
/// in index order and only a strictly closer point replaces the current
/// choice, so ties go to the lowest index. O(n²).
///
/// # Examples
///
/// ```
/// use u_tsp::construct::NearestNeighbor;
/// use u_tsp::model::{Instance, Point};
///
/// let instance = Instance::new(vec![
///     Point::new(1, 0.0, 0.0),
///     Point::new(2, 0.0, 10.0),
///     Point::new(3, 10.0, 10.0),
///     Point::new(4, 10.0, 0.0),
/// ]);
/// let tour = NearestNeighbor::build(&instance, 0).unwrap();
/// assert_eq!(tour.order(), &[0, 1, 2, 3]);
/// assert_eq!(tour.cost(), 40.0);
/// ```
pub struct NearestNeighbor;

impl NearestNeighbor {
    /// Builds the tour starting at point index `start`.
    ///
    /// An empty instance yields the empty tour; otherwise `start` must be a
    /// valid point index.
    pub fn build<M: Metric>(instance: &Instance<M>, start: usize) -> Result<Tour> {
        let n = instance.len();
        if n == 0 {
            return Ok(Tour::empty());
        }
        if start >= n {
            return Err(TspError::IndexOutOfRange { index: start, len: n });
        }

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        visited[start] = true;
        order.push(start);

        let mut last = start;
        let mut cost = 0.0;
        while order.len() < n {
            let mut best: Option<(usize, f64)> = None;
            for (c, _) in visited.iter().enumerate().filter(|&(_, &seen)| !seen) {
                let d = instance.distance(last, c);
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((c, d));
                }
            }
            let Some((next, d)) = best else {
                break;
            };
            visited[next] = true;
            order.push(next);
            cost += d;
            last = next;
        }
        cost += instance.distance(last, start);

        debug!(event = "nearest_neighbor_built", start = start, points = n, cost = cost);
        Ok(Tour::from_parts(order, cost))
    }
}
