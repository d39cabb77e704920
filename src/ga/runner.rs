//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use std::time::Instant;

use rand::Rng;
use tracing::info;

use super::config::GaConfig;
use super::operators::{slice_crossover, swap_mutation};
use super::selection::tournament;
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::model::{Instance, Metric, Tour};
use crate::observer::{Incumbent, Observer, Strategy};
use crate::random::{create_rng, random_permutation};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The cheapest tour seen during the entire run.
    pub best: Tour,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Number of generations completed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-ever cost after initialization and after each generation.
    /// Non-increasing.
    pub cost_history: Vec<f64>,
}

/// Executes the GA evolutionary loop on tours.
///
/// Individuals are visiting orders; fitness is the closed-tour cost (lower
/// is better). Each generation is built from tournament-selected parents
/// through [`slice_crossover`] and [`swap_mutation`], and replaces the
/// previous one entirely apart from `elite_count` copied elites.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::{GaConfig, GaRunner};
/// use u_tsp::model::{Instance, Point};
///
/// let instance = Instance::new(
///     (0..8)
///         .map(|i| Point::new(i + 1, (i * 7 % 5) as f64 * 10.0, (i * 3 % 4) as f64 * 10.0))
///         .collect(),
/// );
/// let config = GaConfig::fast().with_seed(42);
/// let result = GaRunner::run(&instance, &config).unwrap();
/// assert!(result.best.is_permutation_of(8));
/// assert_eq!(result.generations, 100);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run<M: Metric>(instance: &Instance<M>, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(instance, config, &CancelToken::new(), &mut ())
    }

    /// Runs the GA with cancellation support, reporting every new best tour.
    ///
    /// The token is polled at the start of each generation; a cancelled run
    /// returns the best tour found so far.
    pub fn run_with_cancel<M: Metric, O: Observer + ?Sized>(
        instance: &Instance<M>,
        config: &GaConfig,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> Result<GaResult> {
        config.validate()?;

        let n = instance.len();
        if n <= 1 {
            let best = Tour::identity(instance);
            return Ok(GaResult {
                best_cost: best.cost(),
                best,
                generations: 0,
                cancelled: false,
                cost_history: vec![0.0],
            });
        }

        let started = Instant::now();
        let mut rng = create_rng(config.seed);
        info!(
            event = "ga_start",
            points = n,
            population = config.population_size,
            generations = config.max_generations,
        );

        // 1. Initialize and evaluate population
        let mut population: Vec<Tour> = (0..config.population_size)
            .map(|_| Tour::new(random_permutation(n, &mut rng), instance))
            .collect();

        // 2. Track best
        let mut incumbent = Incumbent::unset(Strategy::Genetic);
        if let Some(best) = find_best(&population) {
            incumbent.offer(best, 0, observer);
        }
        let mut cost_history = Vec::with_capacity(config.max_generations + 1);
        cost_history.push(incumbent.cost());

        let mut generations = 0;
        let mut cancelled = false;

        // 3. Evolutionary loop
        for gen in 0..config.max_generations {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            // Elite preservation
            let mut next_gen: Vec<Tour> = Vec::with_capacity(config.population_size);
            if config.elite_count > 0 {
                population.sort_by(|a, b| a.cost().total_cmp(&b.cost()));
                next_gen.extend(population[..config.elite_count].iter().cloned());
            }

            // Generate offspring
            while next_gen.len() < config.population_size {
                let p1 = tournament(&population, config.tournament_size, &mut rng);
                let p2 = tournament(&population, config.tournament_size, &mut rng);

                let mut child = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    slice_crossover(population[p1].order(), population[p2].order(), &mut rng)
                } else {
                    population[p1].order().to_vec()
                };

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    swap_mutation(&mut child, &mut rng);
                }

                next_gen.push(Tour::new(child, instance));
            }

            population = next_gen;
            generations = gen + 1;

            // Update best
            if let Some(best) = find_best(&population) {
                incumbent.offer(best, generations, observer);
            }
            cost_history.push(incumbent.cost());
        }

        let best = incumbent.into_tour();
        info!(
            event = "ga_done",
            points = n,
            cost = best.cost(),
            generations = generations,
            cancelled = cancelled,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(GaResult {
            best_cost: best.cost(),
            best,
            generations,
            cancelled,
            cost_history,
        })
    }
}

/// The cheapest tour of the population.
fn find_best(population: &[Tour]) -> Option<&Tour> {
    population.iter().min_by(|a, b| a.cost().total_cmp(&b.cost()))
}
