//! SA configuration.

use crate::error::{Result, TspError};

/// Configuration for the Simulated Annealing algorithm.
///
/// The temperature starts at `start_temperature` and is multiplied by
/// `cooling_rate` after every `iterations_per_temperature` steps (geometric
/// cooling). The run ends once it drops to `end_temperature`.
///
/// # Examples
///
/// ```
/// use u_tsp::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_start_temperature(500.0)
///     .with_end_temperature(0.01)
///     .with_cooling_rate(0.999)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub start_temperature: f64,

    /// The run stops once the temperature is at or below this value.
    pub end_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Number of steps between two cooling steps.
    pub iterations_per_temperature: usize,

    /// Hard cap on the number of steps. `0` means no cap.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            start_temperature: 100.0,
            end_temperature: 1e-3,
            cooling_rate: 0.995,
            iterations_per_temperature: 1,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SaConfig {
    /// Sets the initial temperature.
    pub fn with_start_temperature(mut self, t: f64) -> Self {
        self.start_temperature = t;
        self
    }

    /// Sets the stopping temperature.
    pub fn with_end_temperature(mut self, t: f64) -> Self {
        self.end_temperature = t;
        self
    }

    /// Sets the cooling factor.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the number of steps per temperature level.
    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    /// Sets the step cap (0 for none).
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for a quick, short schedule.
    ///
    /// - 100 → 0.01, cooling 0.99, 10 steps per level
    pub fn fast() -> Self {
        Self {
            end_temperature: 1e-2,
            cooling_rate: 0.99,
            iterations_per_temperature: 10,
            ..Self::default()
        }
    }

    /// Preset for a moderate schedule.
    ///
    /// - 100 → 0.001, cooling 0.995, 100 steps per level
    pub fn balanced() -> Self {
        Self {
            iterations_per_temperature: 100,
            ..Self::default()
        }
    }

    /// Preset for a slow schedule.
    ///
    /// - 1000 → 0.001, cooling 0.999, 200 steps per level
    pub fn quality() -> Self {
        Self {
            start_temperature: 1000.0,
            cooling_rate: 0.999,
            iterations_per_temperature: 200,
            ..Self::default()
        }
    }

    /// Number of cooling steps the schedule takes from start to end.
    pub fn temperature_levels(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let levels = (self.end_temperature / self.start_temperature).ln() / self.cooling_rate.ln();
        levels.ceil().max(0.0) as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.start_temperature > 0.0) {
            return Err(TspError::InvalidConfig(
                "start_temperature must be positive".into(),
            ));
        }
        if !(self.end_temperature > 0.0) {
            return Err(TspError::InvalidConfig(
                "end_temperature must be positive".into(),
            ));
        }
        if self.end_temperature >= self.start_temperature {
            return Err(TspError::InvalidConfig(
                "end_temperature must be less than start_temperature".into(),
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(TspError::InvalidConfig(
                "cooling_rate must be in (0, 1)".into(),
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err(TspError::InvalidConfig(
                "iterations_per_temperature must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.start_temperature - 100.0).abs() < 1e-10);
        assert!((config.end_temperature - 1e-3).abs() < 1e-15);
        assert!((config.cooling_rate - 0.995).abs() < 1e-10);
        assert_eq!(config.iterations_per_temperature, 1);
        assert_eq!(config.max_iterations, 0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
        assert!(SaConfig::fast().validate().is_ok());
        assert!(SaConfig::balanced().validate().is_ok());
        assert!(SaConfig::quality().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_start_temperature(0.0);
        assert!(matches!(config.validate(), Err(TspError::InvalidConfig(_))));
        let config = SaConfig::default().with_end_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_start_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_end_ge_start() {
        let config = SaConfig::default()
            .with_start_temperature(1.0)
            .with_end_temperature(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling() {
        assert!(SaConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(0.0).validate().is_err());
        assert!(SaConfig::default()
            .with_iterations_per_temperature(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_temperature_levels() {
        let config = SaConfig::default()
            .with_start_temperature(1.0)
            .with_end_temperature(0.3)
            .with_cooling_rate(0.5);
        assert_eq!(config.temperature_levels(), 2);
        assert_eq!(SaConfig::default().with_cooling_rate(2.0).temperature_levels(), 0);
    }
}
