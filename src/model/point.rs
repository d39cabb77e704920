//! Points and pairwise distance functions.

/// An immutable, identity-bearing 2-D point.
///
/// Tours and candidate lists refer to points by their index in an
/// [`Instance`](super::Instance); the `id` is the external identifier read
/// from (and written back to) point files.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Stable external identifier.
    pub id: u32,
    /// Horizontal coordinate (longitude for [`Haversine`]).
    pub x: f64,
    /// Vertical coordinate (latitude for [`Haversine`]).
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// A symmetric pairwise distance function.
///
/// This is the single pluggable cost model of the engine. Any
/// `Fn(&Point, &Point) -> f64` closure that is `Send + Sync` is a metric.
///
/// # Examples
///
/// ```
/// use u_tsp::model::{Metric, Point};
///
/// let manhattan = |a: &Point, b: &Point| (a.x - b.x).abs() + (a.y - b.y).abs();
/// let d = manhattan.distance(&Point::new(1, 0.0, 0.0), &Point::new(2, 3.0, 4.0));
/// assert_eq!(d, 7.0);
/// ```
pub trait Metric: Send + Sync {
    /// Distance between two points. Must be symmetric and zero on identical points.
    fn distance(&self, a: &Point, b: &Point) -> f64;
}

impl<F> Metric for F
where
    F: Fn(&Point, &Point) -> f64 + Send + Sync,
{
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        self(a, b)
    }
}

/// TSPLIB `EUC_2D`: Euclidean distance rounded to the nearest integer.
///
/// This is the default metric; it keeps costs integral so tour lengths
/// compare exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euc2d;

impl Metric for Euc2d {
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        Euclidean.distance(a, b).round()
    }
}

/// Exact Euclidean distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Great-circle distance in kilometres for delivery locations.
///
/// Reads `x` as longitude and `y` as latitude, both in degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

/// Mean earth radius used by [`Haversine`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

impl Metric for Haversine {
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        let lat1 = a.y.to_radians();
        let lat2 = b.y.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (b.x - a.x).to_radians();

        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        EARTH_RADIUS_KM * c
    }
}
