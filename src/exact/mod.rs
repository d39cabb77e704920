//! Exhaustive search.
//!
//! - [`RotationEnumerator`]: lazy permutation generator with an explicit
//!   frame stack
//! - [`ExactRunner`]: evaluates every enumerated tour, reporting each new
//!   best
//!
//! Only tractable for small instances; the number of tours grows as (N-1)!.

mod enumerator;
mod runner;

pub use enumerator::RotationEnumerator;
pub use runner::{ExactResult, ExactRunner};
