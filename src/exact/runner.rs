//! Exhaustive search execution.

use std::time::Instant;

use tracing::{info, warn};

use super::enumerator::RotationEnumerator;
use crate::cancel::CancelToken;
use crate::construct::NearestNeighbor;
use crate::error::Result;
use crate::local::check_tour;
use crate::model::{Instance, Metric, Tour};
use crate::observer::{Incumbent, Observer, Strategy};

/// Above this size a full enumeration is not expected to finish.
const TRACTABLE_POINTS: usize = 12;

/// Result of an exhaustive search.
#[derive(Debug, Clone)]
pub struct ExactResult {
    /// Cheapest tour seen, or the seed if nothing beat it.
    pub best: Tour,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Number of permutations evaluated.
    pub permutations: u64,

    /// Number of times the incumbent was replaced.
    pub improvements: usize,

    /// Whether the run stopped because of cancellation.
    pub cancelled: bool,
}

/// Exhaustive search over all closed tours.
///
/// Enumerates permutations with [`RotationEnumerator`], keeping the last
/// point fixed, and keeps the cheapest tour. Runtime grows factorially
/// with the number of points and is not bounded internally: use it on
/// small instances or with a [`CancelToken`].
///
/// # Examples
///
/// ```
/// use u_tsp::exact::ExactRunner;
/// use u_tsp::model::{Instance, Point};
/// use u_tsp::CancelToken;
///
/// let instance = Instance::new(vec![
///     Point::new(1, 0.0, 0.0),
///     Point::new(2, 10.0, 10.0),
///     Point::new(3, 0.0, 10.0),
///     Point::new(4, 10.0, 0.0),
///     Point::new(5, 5.0, -3.0),
/// ]);
/// let result =
///     ExactRunner::run_from_nearest_neighbor(&instance, &CancelToken::new(), &mut ()).unwrap();
/// assert!(!result.cancelled);
/// assert!(result.best.is_permutation_of(5));
/// ```
pub struct ExactRunner;

impl ExactRunner {
    /// Searches all tours, starting from `seed` as the incumbent.
    ///
    /// The token is checked before every permutation. The seed itself is
    /// not reported to the observer; every later strictly cheaper tour is.
    pub fn run<M: Metric, O: Observer + ?Sized>(
        instance: &Instance<M>,
        mut seed: Tour,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> Result<ExactResult> {
        let n = instance.len();
        check_tour(&seed, n)?;
        seed.recompute_cost(instance);

        let started = Instant::now();
        if n > TRACTABLE_POINTS {
            warn!(event = "exact_search_large", points = n, limit = TRACTABLE_POINTS);
        }
        info!(event = "exact_search_start", points = n, seed_cost = seed.cost());

        let mut enumerator = RotationEnumerator::with_fixed_last(seed.order().to_vec());
        let mut incumbent = Incumbent::new(Strategy::Exact, seed);
        let mut cancelled = false;
        let mut step = 0;

        loop {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            let Some(perm) = enumerator.next_permutation() else {
                break;
            };
            step += 1;
            let cost = instance.tour_cost(perm);
            incumbent.offer_order(perm, cost, step, observer);
        }

        let permutations = enumerator.emitted();
        let improvements = incumbent.improvements();
        let best = incumbent.into_tour();

        info!(
            event = "exact_search_done",
            points = n,
            cost = best.cost(),
            permutations = permutations,
            improvements = improvements,
            cancelled = cancelled,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(ExactResult {
            best_cost: best.cost(),
            best,
            permutations,
            improvements,
            cancelled,
        })
    }

    /// Seeds the search with the nearest-neighbor tour from point 0.
    pub fn run_from_nearest_neighbor<M: Metric, O: Observer + ?Sized>(
        instance: &Instance<M>,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> Result<ExactResult> {
        let seed = NearestNeighbor::build(instance, 0)?;
        Self::run(instance, seed, cancel, observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::observer::{self, Improvement};

    fn instance(coords: &[(f64, f64)]) -> Instance {
        Instance::new(
            coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Point::new(i as u32 + 1, x, y))
                .collect(),
        )
    }

    fn brute_force(inst: &Instance) -> f64 {
        fn rec(inst: &Instance, order: &mut Vec<usize>, used: &mut [bool], best: &mut f64) {
            if order.len() == used.len() {
                *best = best.min(inst.tour_cost(order));
                return;
            }
            for c in 0..used.len() {
                if !used[c] {
                    used[c] = true;
                    order.push(c);
                    rec(inst, order, used, best);
                    order.pop();
                    used[c] = false;
                }
            }
        }
        let mut best = f64::INFINITY;
        rec(inst, &mut Vec::new(), &mut vec![false; inst.len()], &mut best);
        best
    }

    #[test]
    fn test_matches_brute_force() {
        let sets: [&[(f64, f64)]; 4] = [
            &[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)],
            &[(0.0, 0.0), (7.0, 3.0), (2.0, 9.0), (8.0, 8.0), (5.0, 1.0)],
            &[(0.0, 0.0), (30.0, 4.0), (12.0, 25.0), (3.0, 17.0), (22.0, 11.0), (28.0, 27.0)],
            &[(5.0, 5.0), (1.0, 40.0), (33.0, 2.0), (18.0, 18.0), (40.0, 35.0), (9.0, 22.0)],
        ];
        for coords in sets {
            let inst = instance(coords);
            let result =
                ExactRunner::run_from_nearest_neighbor(&inst, &CancelToken::new(), &mut ()).unwrap();
            assert_eq!(result.best_cost, brute_force(&inst), "{coords:?}");
            assert_eq!(result.best_cost, inst.tour_cost(result.best.order()));
            assert!(result.best.is_permutation_of(inst.len()));
            assert!(!result.cancelled);
        }
    }

    #[test]
    fn test_improvements_strictly_decrease_and_beat_seed() {
        let inst = instance(&[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0), (5.0, 12.0)]);
        let seed = Tour::identity(&inst);
        let seed_cost = seed.cost();
        let mut costs = Vec::new();
        let mut obs = observer::from_fn(|imp: &Improvement<'_>| costs.push(imp.cost));
        let result = ExactRunner::run(&inst, seed, &CancelToken::new(), &mut obs).unwrap();
        assert_eq!(costs.len(), result.improvements);
        for w in costs.windows(2) {
            assert!(w[1] < w[0]);
        }
        if let Some(&first) = costs.first() {
            assert!(first < seed_cost);
        }
        // Four free positions: E(4) = 4 * (1 + E(3)) = 64.
        assert_eq!(result.permutations, 64);
    }

    #[test]
    fn test_cancelled_returns_seed() {
        let inst = instance(&[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)]);
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = ExactRunner::run_from_nearest_neighbor(&inst, &cancel, &mut ()).unwrap();
        let nn = NearestNeighbor::build(&inst, 0).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.permutations, 0);
        assert_eq!(result.best.order(), nn.order());
        assert_eq!(result.best_cost, nn.cost());
    }

    #[test]
    fn test_degenerate_instances() {
        let empty = Instance::new(Vec::new());
        let result = ExactRunner::run(&empty, Tour::empty(), &CancelToken::new(), &mut ()).unwrap();
        assert!(result.best.is_empty());
        assert_eq!(result.best_cost, 0.0);

        let single = instance(&[(3.0, 3.0)]);
        let result =
            ExactRunner::run_from_nearest_neighbor(&single, &CancelToken::new(), &mut ()).unwrap();
        assert_eq!(result.best.order(), &[0]);
        assert_eq!(result.permutations, 0);
    }

    #[test]
    fn test_rejects_mismatched_seed() {
        let inst = instance(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let seed = Tour::new(vec![0, 0, 1], &inst);
        assert!(ExactRunner::run(&inst, seed, &CancelToken::new(), &mut ()).is_err());
    }
}
