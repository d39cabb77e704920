//! The point arena every tour indexes into.

use super::matrix::CostMatrix;
use super::point::{Euc2d, Metric, Point};
use crate::error::{Result, TspError};

/// A point set together with its cost model.
///
/// Points are stored once and never mutated in place; tours, candidate
/// lists, and populations hold indices into [`points`](Self::points).
///
/// # Examples
///
/// ```
/// use u_tsp::model::{Instance, Point};
///
/// let instance = Instance::new(vec![
///     Point::new(1, 0.0, 0.0),
///     Point::new(2, 0.0, 10.0),
///     Point::new(3, 10.0, 10.0),
///     Point::new(4, 10.0, 0.0),
/// ]);
/// assert_eq!(instance.tour_cost(&[0, 1, 2, 3]), 40.0);
/// ```
#[derive(Debug, Clone)]
pub struct Instance<M = Euc2d> {
    points: Vec<Point>,
    metric: M,
    matrix: Option<CostMatrix>,
}

impl Instance<Euc2d> {
    /// Creates an instance using the rounded Euclidean metric.
    pub fn new(points: Vec<Point>) -> Self {
        Self::with_metric(points, Euc2d)
    }
}

impl<M: Metric> Instance<M> {
    /// Creates an instance with a custom metric.
    pub fn with_metric(points: Vec<Point>, metric: M) -> Self {
        Self {
            points,
            metric,
            matrix: None,
        }
    }

    /// Precomputes a [`CostMatrix`]; subsequent distance lookups read it.
    pub fn with_cost_matrix(mut self) -> Self {
        self.matrix = Some(CostMatrix::from_points(&self.points, &self.metric));
        self
    }

    /// Replaces the point set, rebuilding the cost matrix if one is held.
    ///
    /// Tours and neighbor lists built for the previous points are no longer
    /// meaningful and must be rebuilt by the caller.
    pub fn replace_points(&mut self, points: Vec<Point>) {
        self.points = points;
        if self.matrix.is_some() {
            self.matrix = Some(CostMatrix::from_points(&self.points, &self.metric));
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when the instance has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points, in index order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The point at `index`.
    pub fn point(&self, index: usize) -> Result<&Point> {
        self.points.get(index).ok_or(TspError::IndexOutOfRange {
            index,
            len: self.points.len(),
        })
    }

    /// The metric used for distances.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The precomputed matrix, if [`with_cost_matrix`](Self::with_cost_matrix) was used.
    pub fn cost_matrix(&self) -> Option<&CostMatrix> {
        self.matrix.as_ref()
    }

    /// Distance between the points at indices `a` and `b`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        match &self.matrix {
            Some(matrix) => matrix.get(a, b),
            None => self.metric.distance(&self.points[a], &self.points[b]),
        }
    }

    /// Cost of the closed tour visiting `order`: consecutive edges plus the
    /// edge from the last point back to the first. Zero for fewer than two
    /// points.
    ///
    /// # Panics
    /// Panics if `order` names an index out of range.
    pub fn tour_cost(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let open: f64 = order.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        open + self.distance(order[order.len() - 1], order[0])
    }

    /// External ids of the points in `order`.
    ///
    /// # Panics
    /// Panics if `order` names an index out of range.
    pub fn ids(&self, order: &[usize]) -> Vec<u32> {
        order.iter().map(|&i| self.points[i].id).collect()
    }

    /// Fails with [`TspError::DegenerateInstance`] when the instance has
    /// fewer than `min` points.
    pub fn require_len(&self, min: usize) -> Result<()> {
        if self.points.len() < min {
            return Err(TspError::DegenerateInstance {
                len: self.points.len(),
            });
        }
        Ok(())
    }
}
