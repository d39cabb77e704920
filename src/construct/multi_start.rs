//! Nearest neighbor from every start, each refined by 2-opt.

use std::time::Instant;

use tracing::info;

use super::nearest::NearestNeighbor;
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::local::{TwoOpt, TwoOptConfig};
use crate::model::{Instance, Metric, Tour};
use crate::observer::{Incumbent, Observer, Strategy};

/// Configuration for [`MultiStart`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiStartConfig {
    /// Maximum number of start points, tried in index order. `0` tries
    /// every point.
    pub max_starts: usize,

    /// Settings of the 2-opt refinement applied to each start.
    pub two_opt: TwoOptConfig,
}

impl MultiStartConfig {
    /// Limits the number of start points (0 for all).
    pub fn with_max_starts(mut self, n: usize) -> Self {
        self.max_starts = n;
        self
    }

    /// Sets the 2-opt refinement settings.
    pub fn with_two_opt(mut self, config: TwoOptConfig) -> Self {
        self.two_opt = config;
        self
    }
}

/// Result of a [`MultiStart`] run.
#[derive(Debug, Clone)]
pub struct MultiStartResult {
    /// Best refined tour over all starts.
    pub best: Tour,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Start index that produced `best`, `None` for an empty instance.
    pub best_start: Option<usize>,

    /// Number of starts fully built and refined.
    pub starts: usize,

    /// Whether the run stopped because of cancellation.
    pub cancelled: bool,
}

/// Multi-start nearest neighbor with 2-opt refinement.
///
/// For each start index in turn a [`NearestNeighbor`] tour is built and
/// improved with full [`TwoOpt`]. A refined tour strictly cheaper than the
/// best so far replaces it and is reported to the observer, which makes a
/// [`CheckpointWriter`](crate::io::CheckpointWriter) keep the best tour on
/// disk while the run goes on.
///
/// # Examples
///
/// ```
/// use u_tsp::construct::{MultiStart, MultiStartConfig};
/// use u_tsp::model::{Instance, Point};
///
/// let instance = Instance::new(vec![
///     Point::new(1, 0.0, 0.0),
///     Point::new(2, 10.0, 10.0),
///     Point::new(3, 0.0, 10.0),
///     Point::new(4, 10.0, 0.0),
/// ]);
/// let result = MultiStart::run(&instance, &MultiStartConfig::default()).unwrap();
/// assert_eq!(result.best_cost, 40.0);
/// assert_eq!(result.starts, 4);
/// ```
pub struct MultiStart;

impl MultiStart {
    /// Runs every start to completion.
    pub fn run<M: Metric>(
        instance: &Instance<M>,
        config: &MultiStartConfig,
    ) -> Result<MultiStartResult> {
        Self::run_with_cancel(instance, config, &CancelToken::new(), &mut ())
    }

    /// Runs with cancellation support, reporting each new best tour.
    ///
    /// The token is polled between starts and inside each 2-opt
    /// refinement. A start interrupted mid-refinement still competes with
    /// its partially refined tour.
    pub fn run_with_cancel<M: Metric, O: Observer + ?Sized>(
        instance: &Instance<M>,
        config: &MultiStartConfig,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> Result<MultiStartResult> {
        let n = instance.len();
        let limit = if config.max_starts == 0 {
            n
        } else {
            config.max_starts.min(n)
        };
        let started = Instant::now();
        info!(event = "multi_start_begin", points = n, starts = limit);

        let mut incumbent = Incumbent::unset(Strategy::MultiStart);
        let mut best_start = None;
        let mut starts = 0;
        let mut cancelled = false;

        for start in 0..limit {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            let tour = NearestNeighbor::build(instance, start)?;
            let refined =
                TwoOpt::run_with_cancel(instance, tour, &config.two_opt, cancel, &mut ())?;
            if incumbent.offer(&refined.tour, start, observer) {
                best_start = Some(start);
            }
            if refined.cancelled {
                cancelled = true;
                break;
            }
            starts += 1;
        }

        let best = if n == 0 {
            Tour::empty()
        } else {
            incumbent.into_tour()
        };

        info!(
            event = "multi_start_done",
            points = n,
            starts = starts,
            cost = best.cost(),
            best_start = best_start,
            cancelled = cancelled,
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(MultiStartResult {
            best_cost: best.cost(),
            best,
            best_start,
            starts,
            cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::observer::{self, Improvement};

    fn square() -> Instance {
        Instance::new(vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 0.0, 10.0),
            Point::new(3, 10.0, 10.0),
            Point::new(4, 10.0, 0.0),
        ])
    }

    fn clustered() -> Instance {
        let coords = [
            (0.0, 0.0),
            (50.0, 3.0),
            (3.0, 40.0),
            (48.0, 45.0),
            (25.0, 22.0),
            (7.0, 12.0),
            (40.0, 10.0),
            (15.0, 38.0),
            (33.0, 41.0),
            (45.0, 25.0),
        ];
        Instance::new(
            coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Point::new(i as u32 + 1, x, y))
                .collect(),
        )
    }

    #[test]
    fn test_square() {
        let result = MultiStart::run(&square(), &MultiStartConfig::default()).unwrap();
        assert_eq!(result.best_cost, 40.0);
        assert_eq!(result.best_start, Some(0));
        assert_eq!(result.starts, 4);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_best_is_no_worse_than_any_single_start() {
        let inst = clustered();
        let result = MultiStart::run(&inst, &MultiStartConfig::default()).unwrap();
        assert!(result.best.is_permutation_of(inst.len()));
        assert_eq!(result.best_cost, inst.tour_cost(result.best.order()));
        for start in 0..inst.len() {
            let nn = NearestNeighbor::build(&inst, start).unwrap();
            assert!(result.best_cost <= nn.cost());
        }
    }

    #[test]
    fn test_reports_strict_improvements_only() {
        let inst = clustered();
        let mut costs = Vec::new();
        let mut obs = observer::from_fn(|imp: &Improvement<'_>| {
            assert_eq!(imp.strategy, Strategy::MultiStart);
            costs.push(imp.cost);
        });
        let result = MultiStart::run_with_cancel(
            &inst,
            &MultiStartConfig::default(),
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
    fn test_max_starts() {
        let config = MultiStartConfig::default().with_max_starts(2);
        let result = MultiStart::run(&clustered(), &config).unwrap();
        assert_eq!(result.starts, 2);
    }

    #[test]
    fn test_empty_instance() {
        let result = MultiStart::run(&Instance::new(Vec::new()), &MultiStartConfig::default())
            .unwrap();
        assert!(result.best.is_empty());
        assert_eq!(result.best_cost, 0.0);
        assert_eq!(result.best_start, None);
        assert_eq!(result.starts, 0);
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let result =
            MultiStart::run_with_cancel(&square(), &MultiStartConfig::default(), &cancel, &mut ())
                .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.starts, 0);
        assert!(result.best.is_empty());
    }
}
