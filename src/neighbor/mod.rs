//! Neighbor candidate generation.
//!
//! - [`NeighborTree`]: transient binary tree that orders candidates by
//!   distance to one owner point
//! - [`NeighborLists`]: the K nearest candidates of every point, used to
//!   prune local-search moves

mod lists;
mod tree;

pub use lists::{NeighborLists, DEFAULT_NEIGHBOR_COUNT};
pub use tree::NeighborTree;
