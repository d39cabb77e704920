//! 2-opt restricted to neighbor candidates.

use std::time::Instant;

use tracing::{info, trace};

use super::config::TwoOptConfig;
use super::two_opt::IMPROVEMENT_EPSILON;
use super::types::{check_tour, LocalSearchResult};
use crate::cancel::CancelToken;
use crate::error::{Result, TspError};
use crate::model::{Instance, Metric, Tour};
use crate::neighbor::NeighborLists;
use crate::observer::{Improvement, Observer, Strategy};

/// 2-opt that only tries moves towards each point's nearest candidates.
///
/// # Algorithm
///
/// For every position `i`, with `a = t[i]` and `b` its successor, the
/// candidates `c` of `a` are tried nearest first while `d(a, c) < d(a, b)`;
/// no farther candidate can produce a gain through the new edge `(a, c)`.
/// With `p` the position of `c` and `dd = t[p+1]`, the move replaces
/// `(a, b)` and `(c, dd)` by `(a, c)` and `(b, dd)`: the segment
/// `t[i+1..=p]` is reversed when `p > i`, otherwise `t[p+1..=i]`.
///
/// Positions are looked up through the tour's position cache, which is
/// refreshed after every applied move. Passes repeat until one applies no
/// move.
///
/// Each pass costs O(N·K) plus O(N) per applied move, against O(N²) for
/// [`TwoOpt`](super::TwoOpt).
pub struct GuidedTwoOpt;

impl GuidedTwoOpt {
    /// Runs guided 2-opt to a local optimum.
    pub fn run<M: Metric>(
        instance: &Instance<M>,
        tour: Tour,
        neighbors: &NeighborLists,
        config: &TwoOptConfig,
    ) -> Result<LocalSearchResult> {
        Self::run_with_cancel(
            instance,
            tour,
            neighbors,
            config,
            &CancelToken::new(),
            &mut (),
        )
    }

    /// Runs guided 2-opt with cancellation support, reporting each applied
    /// move. The token is polled before every position.
    pub fn run_with_cancel<M: Metric, O: Observer + ?Sized>(
        instance: &Instance<M>,
        mut tour: Tour,
        neighbors: &NeighborLists,
        config: &TwoOptConfig,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> Result<LocalSearchResult> {
        let n = instance.len();
        check_tour(&tour, n)?;
        if neighbors.len() != n {
            return Err(TspError::InvalidConfig(format!(
                "neighbor lists cover {} points, instance has {n}",
                neighbors.len()
            )));
        }
        tour.recompute_cost(instance);
        if n <= 2 {
            return Ok(LocalSearchResult::unchanged(tour));
        }

        let started = Instant::now();
        let start_cost = tour.cost();
        let mut improvements = 0;
        let mut passes = 0;
        let mut cancelled = false;
        tour.fix_positions();

        'passes: while !config.pass_limit_reached(passes) {
            passes += 1;
            let mut moved = false;

            for i in 0..n {
                if cancel.is_cancelled() {
                    cancelled = true;
                    break 'passes;
                }
                let a = tour.order()[i];
                for &c in neighbors.get(a)? {
                    let Some(delta) = try_move(instance, &mut tour, i, c) else {
                        break;
                    };
                    if delta < -IMPROVEMENT_EPSILON {
                        tour.adjust_cost(delta);
                        tour.fix_positions();
                        improvements += 1;
                        moved = true;
                        trace!(event = "guided_two_opt_move", position = i, delta = delta);
                        observer.on_improvement(&Improvement {
                            strategy: Strategy::GuidedTwoOpt,
                            cost: tour.cost(),
                            tour: &tour,
                            iteration: improvements,
                        });
                        break;
                    }
                }
            }

            if !moved {
                break;
            }
        }

        info!(
            event = "guided_two_opt_done",
            points = n,
            k = neighbors.k(),
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

/// Evaluates the move connecting `t[i]` to candidate `c`, applying the
/// reversal when it improves.
///
/// Returns `None` once `c` is no closer to `t[i]` than its successor, which
/// ends the candidate walk. Otherwise returns the move's delta; the tour is
/// reversed only when the delta is improving.
fn try_move<M: Metric>(instance: &Instance<M>, tour: &mut Tour, i: usize, c: usize) -> Option<f64> {
    let n = tour.len();
    let order = tour.order();
    let a = order[i];
    let b = order[(i + 1) % n];
    let d_ac = instance.distance(a, c);
    let d_ab = instance.distance(a, b);
    if !(d_ac < d_ab) {
        return None;
    }

    let p = tour.position_of(c)?;
    let dd = order[(p + 1) % n];
    let delta = d_ac + instance.distance(b, dd) - d_ab - instance.distance(c, dd);
    if delta < -IMPROVEMENT_EPSILON {
        if p > i {
            tour.reverse_span(i + 1, p);
        } else {
            tour.reverse_span(p + 1, i);
        }
    }
    Some(delta)
}
