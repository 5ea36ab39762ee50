//! Input point type.

use serde::{Deserialize, Serialize};

/// A single data point in an arbitrary 2-D coordinate space.
///
/// For geographic output `x` is longitude and `y` is latitude, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shorthand for [`Point::new`].
pub fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}
