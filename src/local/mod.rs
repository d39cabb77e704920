//! 2-opt local search.
//!
//! Both variants take a tour by value, improve it in place through segment
//! reversals, and keep its cached cost in step with O(1) deltas.
//!
//! - [`TwoOpt`]: every pair of cut points, first improvement, O(N²) per scan
//! - [`GuidedTwoOpt`]: only moves towards each point's
//!   [`NeighborLists`](crate::neighbor::NeighborLists) candidates
//!
//! # References
//!
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"
//! - Bentley (1992), "Fast Algorithms for Geometric Traveling Salesman Problems"

mod config;
mod guided;
mod two_opt;
mod types;

pub use config::TwoOptConfig;
pub use guided::GuidedTwoOpt;
pub use two_opt::TwoOpt;
pub use types::LocalSearchResult;

pub(crate) use types::check_tour;
