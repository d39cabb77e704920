//! Exhaustive first-improvement 2-opt.

use std::time::Instant;

use tracing::{info, trace};

use super::config::TwoOptConfig;
use super::types::{check_tour, LocalSearchResult};
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::model::{Instance, Metric, Tour};
use crate::observer::{Improvement, Observer, Strategy};

/// Moves must gain more than this to be applied.
pub(crate) const IMPROVEMENT_EPSILON: f64 = 1e-9;

enum Scan {
    Move { i: usize, j: usize, delta: f64 },
    LocalOptimum,
    Cancelled,
}

/// Full pairwise 2-opt.
///
/// # Algorithm
///
/// Each scan tries every pair of cut points `1 <= i < j`, where the move
/// replaces edges `(t[i-1], t[i])` and `(t[j], t[j+1])` by `(t[i-1], t[j])`
/// and `(t[i], t[j+1])` through reversing `t[i..=j]`. The first improving
/// move found is applied and the scan restarts. The run ends when a full
/// scan finds nothing, so the result is 2-optimal over the scanned
/// neighborhood.
///
/// With [`TwoOptConfig::closing_edge`] set (the default) `j` runs to `N-1`
/// and the second edge wraps to `t[0]`. Without it `j` stops at `N-2`.
///
/// Every applied move strictly lowers the cost and is reported to the
/// observer with the working tour.
///
/// # Examples
///
/// ```
/// use u_tsp::local::{TwoOpt, TwoOptConfig};
/// use u_tsp::model::{Instance, Point, Tour};
///
/// let instance = Instance::new(vec![
///     Point::new(1, 0.0, 0.0),
///     Point::new(2, 0.0, 10.0),
///     Point::new(3, 10.0, 10.0),
///     Point::new(4, 10.0, 0.0),
/// ]);
/// let crossing = Tour::new(vec![0, 2, 1, 3], &instance);
/// let result = TwoOpt::run(&instance, crossing, &TwoOptConfig::default()).unwrap();
/// assert_eq!(result.cost, 40.0);
/// ```
pub struct TwoOpt;

impl TwoOpt {
    /// Runs 2-opt to a local optimum.
    pub fn run<M: Metric>(
        instance: &Instance<M>,
        tour: Tour,
        config: &TwoOptConfig,
    ) -> Result<LocalSearchResult> {
        Self::run_with_cancel(instance, tour, config, &CancelToken::new(), &mut ())
    }

    /// Runs 2-opt with cancellation support, reporting each applied move.
    ///
    /// The token is polled before each scan and before each first cut
    /// point. A cancelled run returns the tour as improved so far.
    pub fn run_with_cancel<M: Metric, O: Observer + ?Sized>(
        instance: &Instance<M>,
        mut tour: Tour,
        config: &TwoOptConfig,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> Result<LocalSearchResult> {
        let n = instance.len();
        check_tour(&tour, n)?;
        tour.recompute_cost(instance);
        if n <= 2 {
            return Ok(LocalSearchResult::unchanged(tour));
        }

        let started = Instant::now();
        let start_cost = tour.cost();
        let last_j = if config.closing_edge { n - 1 } else { n - 2 };
        let mut improvements = 0;
        let mut passes = 0;
        let mut cancelled = false;

        while !config.pass_limit_reached(passes) {
            passes += 1;
            match scan(instance, tour.order(), last_j, cancel) {
                Scan::Move { i, j, delta } => {
                    tour.reverse_span(i, j);
                    tour.adjust_cost(delta);
                    improvements += 1;
                    trace!(event = "two_opt_move", i = i, j = j, delta = delta);
                    observer.on_improvement(&Improvement {
                        strategy: Strategy::TwoOpt,
                        cost: tour.cost(),
                        tour: &tour,
                        iteration: improvements,
                    });
                }
                Scan::LocalOptimum => break,
                Scan::Cancelled => {
                    cancelled = true;
                    break;
                }
            }
        }

        info!(
            event = "two_opt_done",
            points = n,
            start_cost = start_cost,
            cost = tour.cost(),
            improvements = improvements,
            passes = passes,
            cancelled = cancelled,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(LocalSearchResult {
            cost: tour.cost(),
            tour,
            improvements,
            passes,
            cancelled,
        })
    }
}

fn scan<M: Metric>(
    instance: &Instance<M>,
    order: &[usize],
    last_j: usize,
    cancel: &CancelToken,
) -> Scan {
    let n = order.len();
    for i in 1..n {
        if cancel.is_cancelled() {
            return Scan::Cancelled;
        }
        let a = order[i - 1];
        let b = order[i];
        let d_ab = instance.distance(a, b);
        for j in (i + 1)..=last_j {
            let c = order[j];
            let d = order[(j + 1) % n];
            let delta = instance.distance(a, c) + instance.distance(b, d)
                - d_ab
                - instance.distance(c, d);
            if delta < -IMPROVEMENT_EPSILON {
                return Scan::Move { i, j, delta };
            }
        }
    }
    Scan::LocalOptimum
}
