//! Improvement notifications.
//!
//! Every strategy keeps its best-so-far tour in an [`Incumbent`]. The
//! incumbent is the only place that talks to an [`Observer`], and it only
//! does so when a candidate is strictly cheaper than the current best, so
//! observers see a strictly decreasing sequence of costs within one run.

use std::fmt;

use tracing::debug;

use crate::model::Tour;

/// Which strategy produced an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Nearest neighbor from every start, each refined by 2-opt.
    MultiStart,
    /// Full pairwise 2-opt.
    TwoOpt,
    /// Neighbor-list guided 2-opt.
    GuidedTwoOpt,
    /// Exhaustive permutation enumeration.
    Exact,
    /// Genetic algorithm.
    Genetic,
    /// Simulated annealing.
    Annealing,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::MultiStart => "multi-start",
            Strategy::TwoOpt => "2-opt",
            Strategy::GuidedTwoOpt => "guided-2-opt",
            Strategy::Exact => "exact",
            Strategy::Genetic => "genetic",
            Strategy::Annealing => "annealing",
        };
        f.write_str(name)
    }
}

/// A strictly improving incumbent, as seen by an [`Observer`].
#[derive(Debug, Clone, Copy)]
pub struct Improvement<'a> {
    /// Strategy that found the tour.
    pub strategy: Strategy,
    /// Cost of the new best tour.
    pub cost: f64,
    /// The new best tour.
    pub tour: &'a Tour,
    /// Strategy-specific progress counter (generation, step, start index, ...).
    pub iteration: usize,
}

/// Receives improvement notifications.
///
/// Called synchronously on the solving thread; the tour borrowed in the
/// event is not mutated while the call runs.
///
/// Implemented for `()` (ignore everything), for `&mut O`, for pairs
/// `(A, B)` (notify both), and for closures through [`from_fn`].
pub trait Observer {
    /// Called once per strictly improving incumbent.
    fn on_improvement(&mut self, improvement: &Improvement<'_>);
}

impl Observer for () {
    fn on_improvement(&mut self, _improvement: &Improvement<'_>) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_improvement(&mut self, improvement: &Improvement<'_>) {
        (**self).on_improvement(improvement);
    }
}

impl<A: Observer, B: Observer> Observer for (A, B) {
    fn on_improvement(&mut self, improvement: &Improvement<'_>) {
        self.0.on_improvement(improvement);
        self.1.on_improvement(improvement);
    }
}

/// Observer backed by a closure. Created by [`from_fn`].
pub struct FnObserver<F>(F);

impl<F: FnMut(&Improvement<'_>)> Observer for FnObserver<F> {
    fn on_improvement(&mut self, improvement: &Improvement<'_>) {
        (self.0)(improvement);
    }
}

/// Wraps a closure as an [`Observer`].
///
/// # Examples
///
/// ```
/// use u_tsp::observer::{from_fn, Improvement};
///
/// let mut costs = Vec::new();
/// let observer = from_fn(|imp: &Improvement<'_>| costs.push(imp.cost));
/// # drop(observer);
/// ```
pub fn from_fn<F: FnMut(&Improvement<'_>)>(f: F) -> FnObserver<F> {
    FnObserver(f)
}

/// Best-so-far tour of one strategy run.
#[derive(Debug, Clone)]
pub struct Incumbent {
    strategy: Strategy,
    tour: Tour,
    improvements: usize,
}

impl Incumbent {
    /// Starts from `seed`. The seed itself is not reported.
    pub fn new(strategy: Strategy, seed: Tour) -> Self {
        Self {
            strategy,
            tour: seed,
            improvements: 0,
        }
    }

    /// Starts with no tour; the first offer always wins.
    pub fn unset(strategy: Strategy) -> Self {
        Self::new(strategy, Tour::from_parts(Vec::new(), f64::INFINITY))
    }

    /// Current best cost (`+inf` while unset).
    pub fn cost(&self) -> f64 {
        self.tour.cost()
    }

    /// Current best tour.
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Number of accepted improvements so far.
    pub fn improvements(&self) -> usize {
        self.improvements
    }

    /// Replaces the incumbent with `candidate` if it is strictly cheaper,
    /// notifying `observer`. Returns whether it was accepted.
    pub fn offer<O: Observer + ?Sized>(
        &mut self,
        candidate: &Tour,
        iteration: usize,
        observer: &mut O,
    ) -> bool {
        if !(candidate.cost() < self.tour.cost()) {
            return false;
        }
        self.tour = candidate.clone();
        self.accept(iteration, observer);
        true
    }

    /// Like [`offer`](Self::offer) for a bare visiting order with a known cost,
    /// copying the order only when it wins.
    pub fn offer_order<O: Observer + ?Sized>(
        &mut self,
        order: &[usize],
        cost: f64,
        iteration: usize,
        observer: &mut O,
    ) -> bool {
        if !(cost < self.tour.cost()) {
            return false;
        }
        self.tour = Tour::from_parts(order.to_vec(), cost);
        self.accept(iteration, observer);
        true
    }

    /// Consumes the incumbent. An unset incumbent yields the empty tour.
    pub fn into_tour(self) -> Tour {
        if self.tour.cost().is_infinite() && self.tour.is_empty() {
            return Tour::empty();
        }
        self.tour
    }

    fn accept<O: Observer + ?Sized>(&mut self, iteration: usize, observer: &mut O) {
        self.improvements += 1;
        debug!(
            event = "incumbent_improved",
            strategy = %self.strategy,
            cost = self.tour.cost(),
            iteration = iteration,
        );
        observer.on_improvement(&Improvement {
            strategy: self.strategy,
            cost: self.tour.cost(),
            tour: &self.tour,
            iteration,
        });
    }
}
