//! Closed tours over an [`Instance`].

use super::instance::Instance;
use super::point::Metric;
use crate::error::{Result, TspError};

/// An ordered, cyclic sequence of point indices with a cached total cost.
///
/// The cached cost is kept in step by the strategies through
/// [`adjust_cost`](Self::adjust_cost), so a move costs O(1) to account
/// for instead of a full O(n) recomputation.
///
/// A tour can also cache each point's position
/// ([`fix_positions`](Self::fix_positions)). The cache is only valid until
/// the next mutation; [`position_of`](Self::position_of) returns `None`
/// while it is stale.
///
/// # Examples
///
/// ```
/// use u_tsp::model::{Instance, Point, Tour};
///
/// let instance = Instance::new(vec![
///     Point::new(1, 0.0, 0.0),
///     Point::new(2, 0.0, 10.0),
///     Point::new(3, 10.0, 10.0),
/// ]);
/// let mut tour = Tour::new(vec![2, 0, 1], &instance);
/// assert_eq!(tour.cost(), 34.0);
///
/// tour.fix_positions();
/// assert_eq!(tour.position_of(0), Some(1));
/// tour.swap(0, 2).unwrap();
/// assert_eq!(tour.position_of(0), None);
/// ```
#[derive(Debug, Clone)]
pub struct Tour {
    order: Vec<usize>,
    cost: f64,
    positions: Vec<usize>,
    positions_fresh: bool,
}

impl Tour {
    /// Creates a tour and computes its cost.
    ///
    /// # Panics
    /// Panics if `order` names an index outside the instance; use
    /// [`try_new`](Self::try_new) for untrusted orders.
    pub fn new<M: Metric>(order: Vec<usize>, instance: &Instance<M>) -> Self {
        let cost = instance.tour_cost(&order);
        Self::from_parts(order, cost)
    }

    /// Creates a tour from an order that must visit every point of
    /// `instance` exactly once.
    ///
    /// An index beyond the instance is [`TspError::IndexOutOfRange`]; a
    /// repeated point or a wrong length is [`TspError::InvalidTour`].
    pub fn try_new<M: Metric>(order: Vec<usize>, instance: &Instance<M>) -> Result<Self> {
        let n = instance.len();
        let mut seen = vec![false; n];
        for &point in &order {
            match seen.get_mut(point) {
                None => return Err(TspError::IndexOutOfRange { index: point, len: n }),
                Some(true) => {
                    return Err(TspError::InvalidTour(format!(
                        "point {point} is visited twice"
                    )))
                }
                Some(slot) => *slot = true,
            }
        }
        if order.len() != n {
            return Err(TspError::InvalidTour(format!(
                "expected {n} points, got {}",
                order.len()
            )));
        }
        Ok(Self::new(order, instance))
    }

    /// Visits points in index order.
    pub fn identity<M: Metric>(instance: &Instance<M>) -> Self {
        Self::new((0..instance.len()).collect(), instance)
    }

    /// The tour over zero points, with cost 0.
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), 0.0)
    }

    pub(crate) fn from_parts(order: Vec<usize>, cost: f64) -> Self {
        Self {
            order,
            cost,
            positions: Vec::new(),
            positions_fresh: false,
        }
    }

    /// Number of points visited.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` for the empty tour.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Point indices in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the tour, returning the visiting order.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Cached total cost, including the closing edge.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Adds `delta` to the cached cost after an incremental move.
    pub fn adjust_cost(&mut self, delta: f64) {
        self.cost += delta;
    }

    /// Recomputes the cost from scratch and caches it.
    pub fn recompute_cost<M: Metric>(&mut self, instance: &Instance<M>) -> f64 {
        self.cost = instance.tour_cost(&self.order);
        self.cost
    }

    /// Point index at tour position `pos`.
    pub fn get(&self, pos: usize) -> Result<usize> {
        self.order.get(pos).copied().ok_or(TspError::IndexOutOfRange {
            index: pos,
            len: self.order.len(),
        })
    }

    /// Tour position following `pos`, wrapping at the end.
    #[inline]
    pub fn next_pos(&self, pos: usize) -> usize {
        if pos + 1 == self.order.len() {
            0
        } else {
            pos + 1
        }
    }

    /// Tour position preceding `pos`, wrapping at the start.
    #[inline]
    pub fn prev_pos(&self, pos: usize) -> usize {
        if pos == 0 {
            self.order.len() - 1
        } else {
            pos - 1
        }
    }

    /// Reverses the sub-tour at positions `i..=j`.
    ///
    /// Leaves the cached cost untouched; pair with
    /// [`adjust_cost`](Self::adjust_cost).
    pub fn reverse_segment(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_pos(i)?;
        self.check_pos(j)?;
        if i < j {
            self.reverse_span(i, j);
        }
        Ok(())
    }

    /// Exchanges the points at positions `i` and `j`.
    ///
    /// Leaves the cached cost untouched; pair with
    /// [`adjust_cost`](Self::adjust_cost).
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_pos(i)?;
        self.check_pos(j)?;
        self.swap_span(i, j);
        Ok(())
    }

    #[inline]
    pub(crate) fn reverse_span(&mut self, i: usize, j: usize) {
        self.order[i..=j].reverse();
        self.positions_fresh = false;
    }

    #[inline]
    pub(crate) fn swap_span(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
        self.positions_fresh = false;
    }

    /// Records every point's current position.
    pub fn fix_positions(&mut self) {
        self.positions.clear();
        self.positions.resize(self.order.len(), usize::MAX);
        for (pos, &point) in self.order.iter().enumerate() {
            if let Some(slot) = self.positions.get_mut(point) {
                *slot = pos;
            }
        }
        self.positions_fresh = true;
    }

    /// Position of `point`, if positions were fixed since the last mutation.
    pub fn position_of(&self, point: usize) -> Option<usize> {
        if !self.positions_fresh {
            return None;
        }
        self.positions.get(point).copied().filter(|&p| p != usize::MAX)
    }

    /// Returns `true` when the tour visits each of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &p in &self.order {
            if p >= n || seen[p] {
                return false;
            }
            seen[p] = true;
        }
        true
    }

    fn check_pos(&self, pos: usize) -> Result<()> {
        if pos >= self.order.len() {
            return Err(TspError::IndexOutOfRange {
                index: pos,
                len: self.order.len(),
            });
        }
        Ok(())
    }
}
