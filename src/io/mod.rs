//! File input and output.
//!
//! - [`tsplib`]: reads points from the coordinate section of a TSPLIB file
//! - [`solution`]: writes and reads solution files
//! - [`CheckpointWriter`]: observer that keeps the best tour on disk

pub mod solution;
pub mod tsplib;

pub use solution::{save_solution, write_solution, CheckpointWriter};
pub use tsplib::{read_instance, read_points, read_points_or_empty};
