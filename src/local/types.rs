//! Local search result type.

use crate::error::{Result, TspError};
use crate::model::Tour;

/// Result of a 2-opt run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult {
    /// The improved tour.
    pub tour: Tour,

    /// Cost of `tour`.
    pub cost: f64,

    /// Number of improving moves applied.
    pub improvements: usize,

    /// Number of scans over the tour, including the final one that found
    /// no move.
    pub passes: usize,

    /// Whether the run stopped because of cancellation.
    pub cancelled: bool,
}

impl LocalSearchResult {
    pub(crate) fn unchanged(tour: Tour) -> Self {
        Self {
            cost: tour.cost(),
            tour,
            improvements: 0,
            passes: 0,
            cancelled: false,
        }
    }
}

/// Rejects tours that do not visit every point of an `n`-point instance once.
pub(crate) fn check_tour(tour: &Tour, n: usize) -> Result<()> {
    if tour.is_permutation_of(n) {
        Ok(())
    } else {
        Err(TspError::InvalidTour(format!(
            "expected a permutation of {n} points, got {} positions",
            tour.len()
        )))
    }
}
