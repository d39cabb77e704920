//! Tour data model.
//!
//! - [`Point`]: immutable 2-D point with an external id
//! - [`Metric`]: the pluggable pairwise distance ([`Euc2d`], [`Euclidean`], [`Haversine`])
//! - [`CostMatrix`]: precomputed symmetric costs (delivery variant)
//! - [`Instance`]: the point arena plus its metric
//! - [`Tour`]: a cyclic visiting order with a cached cost

mod instance;
mod matrix;
mod point;
mod tour;

pub use instance::Instance;
pub use matrix::CostMatrix;
pub use point::{Euc2d, Euclidean, Haversine, Metric, Point, EARTH_RADIUS_KM};
pub use tour::Tour;
