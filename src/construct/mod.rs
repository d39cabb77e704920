//! Initial tour construction.
//!
//! - [`NearestNeighbor`]: greedy tour from one start point
//! - [`MultiStart`]: nearest neighbor from every start, each refined by
//!   2-opt, keeping the best

mod multi_start;
mod nearest;

pub use multi_start::{MultiStart, MultiStartConfig, MultiStartResult};
pub use nearest::NearestNeighbor;
