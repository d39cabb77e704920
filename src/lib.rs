//! Tour optimization engine for the two-dimensional Traveling Salesman Problem.
//!
//! Given points in the plane, finds a short closed tour that visits every
//! point exactly once. Provides:
//!
//! - **Construction**: nearest neighbor from one start, or from every start
//!   with 2-opt refinement ([`construct`]).
//! - **Local search**: exhaustive 2-opt and 2-opt restricted to per-point
//!   neighbor candidates ([`local`], [`neighbor`]).
//! - **Exact search**: enumeration of all tours for small instances
//!   ([`exact`]).
//! - **Genetic Algorithm (GA)**: population of permutations with slice
//!   crossover and swap mutation ([`ga`]).
//! - **Simulated Annealing (SA)**: random swaps under geometric cooling
//!   ([`sa`]).
//!
//! Every long-running strategy takes a [`CancelToken`] and reports each
//! strictly better tour to an [`Observer`]; [`io::CheckpointWriter`] uses
//! that to keep the best tour in a solution file while the search runs.
//!
//! # Example
//!
//! ```
//! use u_tsp::construct::NearestNeighbor;
//! use u_tsp::local::{TwoOpt, TwoOptConfig};
//! use u_tsp::model::{Instance, Point};
//!
//! let instance = Instance::new(vec![
//!     Point::new(1, 0.0, 0.0),
//!     Point::new(2, 10.0, 10.0),
//!     Point::new(3, 0.0, 10.0),
//!     Point::new(4, 10.0, 0.0),
//! ]);
//! let start = NearestNeighbor::build(&instance, 0)?;
//! let result = TwoOpt::run(&instance, start, &TwoOptConfig::default())?;
//! assert_eq!(result.cost, 40.0);
//! # Ok::<(), u_tsp::TspError>(())
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber.

pub mod cancel;
pub mod construct;
pub mod error;
pub mod exact;
pub mod ga;
pub mod io;
pub mod local;
pub mod model;
pub mod neighbor;
pub mod observer;
pub mod random;
pub mod sa;

pub use cancel::CancelToken;
pub use error::{Result, TspError};
pub use model::{Instance, Point, Tour};
pub use observer::{Improvement, Observer, Strategy};
