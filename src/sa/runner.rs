//! SA execution loop.

use std::time::Instant;

use rand::Rng;
use tracing::info;

use super::config::SaConfig;
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::model::{Instance, Metric, Tour};
use crate::observer::{Incumbent, Observer, Strategy};
use crate::random::{create_rng, random_permutation, two_positions};

/// Steps between two cost history samples.
const HISTORY_INTERVAL: usize = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The cheapest tour seen.
    pub best: Tour,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Total number of steps (swap evaluations).
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost at the start, every 100 steps, and at the end.
    pub cost_history: Vec<f64>,
}

/// Executes Simulated Annealing on tours.
///
/// # Algorithm
///
/// Starts from a random permutation. Each step swaps two random positions
/// and applies the Metropolis criterion: an improving swap is always kept,
/// a worsening one with probability `exp(-delta / T)`. The delta is
/// computed from the at most four edges the swap touches, so a step costs
/// O(1). The best tour ever seen is tracked separately from the current
/// one and reported on every strict improvement.
///
/// # Examples
///
/// ```
/// use u_tsp::model::{Instance, Point};
/// use u_tsp::sa::{SaConfig, SaRunner};
///
/// let instance = Instance::new(
///     (0..10)
///         .map(|i| Point::new(i + 1, (i % 5) as f64 * 10.0, (i / 5) as f64 * 10.0))
///         .collect(),
/// );
/// let result = SaRunner::run(&instance, &SaConfig::fast().with_seed(42)).unwrap();
/// assert!(result.best.is_permutation_of(10));
/// assert!(result.final_temperature <= 0.01);
/// ```
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    pub fn run<M: Metric>(instance: &Instance<M>, config: &SaConfig) -> Result<SaResult> {
        Self::run_with_cancel(instance, config, &CancelToken::new(), &mut ())
    }

    /// Runs SA with cancellation support, reporting every new best tour.
    ///
    /// The token is polled before every step.
    pub fn run_with_cancel<M: Metric, O: Observer + ?Sized>(
        instance: &Instance<M>,
        config: &SaConfig,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> Result<SaResult> {
        config.validate()?;

        let n = instance.len();
        if n <= 1 {
            let best = Tour::identity(instance);
            return Ok(SaResult {
                best_cost: best.cost(),
                best,
                iterations: 0,
                accepted_moves: 0,
                improving_moves: 0,
                final_temperature: config.start_temperature,
                cancelled: false,
                cost_history: vec![0.0],
            });
        }

        let started = Instant::now();
        let mut rng = create_rng(config.seed);
        info!(
            event = "sa_start",
            points = n,
            start_temperature = config.start_temperature,
            end_temperature = config.end_temperature,
            cooling_rate = config.cooling_rate,
        );

        // Initialize
        let mut current = Tour::new(random_permutation(n, &mut rng), instance);
        let mut incumbent = Incumbent::unset(Strategy::Annealing);
        incumbent.offer(&current, 0, observer);

        let mut temperature = config.start_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut cost_history = vec![incumbent.cost()];

        'cooling: while temperature > config.end_temperature {
            for _ in 0..config.iterations_per_temperature {
                if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                    break 'cooling;
                }
                if cancel.is_cancelled() {
                    cancelled = true;
                    break 'cooling;
                }

                let (i, j) = two_positions(n, &mut rng);
                let delta = swap_delta(instance, current.order(), i, j);

                // Metropolis acceptance criterion
                let accept = if delta < 0.0 {
                    improving_moves += 1;
                    true
                } else {
                    rng.random_range(0.0..1.0) < (-delta / temperature).exp()
                };

                if accept {
                    current.swap_span(i, j);
                    current.adjust_cost(delta);
                    accepted_moves += 1;

                    if current.cost() < incumbent.cost() {
                        // Resync before publishing, deltas accumulate rounding.
                        current.recompute_cost(instance);
                        incumbent.offer(&current, total_iterations + 1, observer);
                    }
                }

                total_iterations += 1;
                if total_iterations % HISTORY_INTERVAL == 0 {
                    cost_history.push(incumbent.cost());
                }
            }

            // Cool down
            temperature *= config.cooling_rate;
        }

        // Final history entry
        if cost_history
            .last()
            .is_none_or(|&last| (last - incumbent.cost()).abs() > 1e-15)
        {
            cost_history.push(incumbent.cost());
        }

        let best = incumbent.into_tour();
        info!(
            event = "sa_done",
            points = n,
            cost = best.cost(),
            iterations = total_iterations,
            accepted = accepted_moves,
            improving = improving_moves,
            final_temperature = temperature,
            cancelled = cancelled,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(SaResult {
            best_cost: best.cost(),
            best,
            iterations: total_iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            cancelled,
            cost_history,
        })
    }
}

/// Cost change of swapping the points at positions `i` and `j`.
///
/// Only the edges starting at `prev(i)`, `i`, `prev(j)` and `j` change;
/// when the positions are adjacent some of those coincide and are counted
/// once.
fn swap_delta<M: Metric>(instance: &Instance<M>, order: &[usize], i: usize, j: usize) -> f64 {
    if i == j {
        return 0.0;
    }
    let n = order.len();
    let prev = |p: usize| if p == 0 { n - 1 } else { p - 1 };
    let next = |p: usize| if p + 1 == n { 0 } else { p + 1 };
    let swapped = |p: usize| {
        if p == i {
            order[j]
        } else if p == j {
            order[i]
        } else {
            order[p]
        }
    };

    let mut starts = [prev(i), i, prev(j), j];
    starts.sort_unstable();
    let mut delta = 0.0;
    for (k, &s) in starts.iter().enumerate() {
        if k > 0 && starts[k - 1] == s {
            continue;
        }
        delta += instance.distance(swapped(s), swapped(next(s)));
        delta -= instance.distance(order[s], order[next(s)]);
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::observer::{self, Improvement};

    fn circle(n: usize) -> Instance {
        Instance::new(
            (0..n)
                .map(|i| {
                    let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                    Point::new(
                        i as u32 + 1,
                        (100.0 * angle.cos()).round(),
                        (100.0 * angle.sin()).round(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_swap_delta_matches_recompute() {
        let inst = circle(7);
        let order = vec![3, 0, 5, 1, 6, 2, 4];
        let base = inst.tour_cost(&order);
        for i in 0..7 {
            for j in 0..7 {
                let mut swapped = order.clone();
                swapped.swap(i, j);
                let expected = inst.tour_cost(&swapped) - base;
                let got = swap_delta(&inst, &order, i, j);
                assert!((got - expected).abs() < 1e-9, "i={i} j={j}");
            }
        }
    }

    #[test]
    fn test_swap_delta_small_tours() {
        let inst = circle(3);
        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            assert!(swap_delta(&inst, &[0, 1, 2], i, j).abs() < 1e-9);
        }
        let inst = circle(2);
        assert_eq!(swap_delta(&inst, &[0, 1], 0, 1), 0.0);
    }

    #[test]
    fn test_improves_random_start() {
        let inst = circle(15);
        let config = SaConfig::balanced().with_seed(42);
        let result = SaRunner::run(&inst, &config).unwrap();
        assert!(result.best.is_permutation_of(15));
        assert_eq!(result.best_cost, inst.tour_cost(result.best.order()));
        assert!(result.best_cost <= result.cost_history[0]);
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves >= result.improving_moves);
        assert!(result.final_temperature <= config.end_temperature);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_cost_history_is_non_increasing() {
        let inst = circle(12);
        let result = SaRunner::run(&inst, &SaConfig::fast().with_seed(5)).unwrap();
        for w in result.cost_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert_eq!(result.cost_history.last().copied(), Some(result.best_cost));
    }

    #[test]
    fn test_notifications_strictly_decrease() {
        let inst = circle(12);
        let mut costs = Vec::new();
        let mut obs = observer::from_fn(|imp: &Improvement<'_>| {
            assert_eq!(imp.strategy, Strategy::Annealing);
            costs.push(imp.cost);
        });
        let result = SaRunner::run_with_cancel(
            &inst,
            &SaConfig::fast().with_seed(9),
            &CancelToken::new(),
            &mut obs,
        )
        .unwrap();
        assert!(!costs.is_empty());
        for w in costs.windows(2) {
            assert!(w[1] < w[0]);
        }
        assert_eq!(costs.last().copied(), Some(result.best_cost));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let inst = circle(10);
        let config = SaConfig::fast().with_seed(77);
        let a = SaRunner::run(&inst, &config).unwrap();
        let b = SaRunner::run(&inst, &config).unwrap();
        assert_eq!(a.best.order(), b.best.order());
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_max_iterations() {
        let inst = circle(10);
        let config = SaConfig::default().with_max_iterations(250).with_seed(1);
        let result = SaRunner::run(&inst, &config).unwrap();
        assert_eq!(result.iterations, 250);
    }

    #[test]
    fn test_iteration_count_follows_schedule() {
        let inst = circle(6);
        let config = SaConfig::default()
            .with_start_temperature(1.0)
            .with_end_temperature(0.3)
            .with_cooling_rate(0.5)
            .with_iterations_per_temperature(4)
            .with_seed(2);
        let result = SaRunner::run(&inst, &config).unwrap();
        assert_eq!(result.iterations, config.temperature_levels() * 4);
    }

    #[test]
    fn test_cancellation() {
        let inst = circle(10);
        let cancel = CancelToken::new();
        cancel.cancel();
        let result =
            SaRunner::run_with_cancel(&inst, &SaConfig::default(), &cancel, &mut ()).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert!(result.best.is_permutation_of(10));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let inst = circle(5);
        let config = SaConfig::default().with_cooling_rate(1.5);
        assert!(SaRunner::run(&inst, &config).is_err());
    }

    #[test]
    fn test_trivial_instance() {
        let single = Instance::new(vec![Point::new(1, 1.0, 1.0)]);
        let result = SaRunner::run(&single, &SaConfig::default()).unwrap();
        assert_eq!(result.best.order(), &[0]);
        assert_eq!(result.iterations, 0);
    }
}
