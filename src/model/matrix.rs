//! Precomputed pairwise costs for the delivery variant.

use super::point::{Metric, Point};

/// Dense N×N symmetric cost matrix.
///
/// Invariants: `get(i, i) == 0` and `get(i, j) == get(j, i)`. The matrix is
/// derived entirely from a point set and a metric; when the point set
/// changes it is rebuilt in full.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    n: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Computes all pairwise distances. O(n²) metric evaluations / 2.
    pub fn from_points<M: Metric + ?Sized>(points: &[Point], metric: &M) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = metric.distance(&points[i], &points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Cost between points `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is `>= len()`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "matrix index out of range");
        self.data[i * self.n + j]
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` for the 0×0 matrix.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// One row of the matrix.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}
