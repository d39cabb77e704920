//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{Result, TspError};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.elite_count, 0);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(300)
///     .with_tournament_size(5)
///     .with_elite_count(2)
///     .with_mutation_rate(0.07);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in the population.
    ///
    /// Larger populations increase diversity but slow down each generation.
    pub population_size: usize,

    /// Number of generations to run. There is no early stop other than
    /// cancellation.
    pub max_generations: usize,

    /// Probability of producing a child by crossover (0.0–1.0).
    ///
    /// When crossover is not applied, the child is a copy of the first
    /// parent.
    pub crossover_rate: f64,

    /// Probability of applying swap mutation to a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of random draws per tournament.
    pub tournament_size: usize,

    /// Number of cheapest tours copied unchanged into the next generation.
    ///
    /// `0` (the default) regenerates the whole population every generation;
    /// the best tour ever seen is still tracked separately.
    pub elite_count: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            tournament_size: 3,
            elite_count: 0,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for fast optimization: small population, few generations.
    ///
    /// - Population: 50, Generations: 100
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            ..Self::default()
        }
    }

    /// Preset for balanced optimization.
    ///
    /// - Population: 100, Generations: 1000, 1 elite
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            elite_count: 1,
            ..Self::default()
        }
    }

    /// Preset for quality optimization: large population, many generations
    /// and a low crossover rate that lets good tours survive by copying.
    ///
    /// - Population: 300, Generations: 9000
    /// - Crossover: 0.7, Mutation: 0.07, 2 elites
    pub fn quality() -> Self {
        Self {
            population_size: 300,
            max_generations: 9000,
            crossover_rate: 0.7,
            mutation_rate: 0.07,
            elite_count: 2,
            ..Self::default()
        }
    }

    /// Selects a preset from the number of points.
    ///
    /// - `points < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ points < 200` → [`balanced()`](Self::balanced)
    /// - `points ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(points: usize) -> Self {
        if points < 50 {
            Self::fast()
        } else if points < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(TspError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(TspError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(TspError::InvalidConfig(
                "elite_count too high: elites fill entire population".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::InvalidConfig(
                "crossover_rate and mutation_rate must lie in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
