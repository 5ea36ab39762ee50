//! Axis-aligned bounds of a point set.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// The smallest axis-aligned rectangle containing a set of points.
///
/// `min.x <= max.x` and `min.y <= max.y` always hold. A single point (or a
/// set of identical points) gives zero spread on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Bounds covering exactly one point.
    pub fn from_point(point: Point) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grow the bounds so they contain `point`.
    pub fn include(&mut self, point: &Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Horizontal spread.
    pub fn dx(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical spread.
    pub fn dy(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Check if a point lies within the bounds (edges included).
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// True if the whole rectangle lies inside the given range.
    pub fn in_range(&self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> bool {
        self.min.x >= min_x && self.max.x <= max_x && self.min.y >= min_y && self.max.y <= max_y
    }

    /// True if the bounds are plausible longitude/latitude degrees.
    pub fn in_geographic_range(&self) -> bool {
        self.in_range(
            LONGITUDE_RANGE.0,
            LONGITUDE_RANGE.1,
            LATITUDE_RANGE.0,
            LATITUDE_RANGE.1,
        )
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] - [{}, {}]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::p;

    #[test]
    fn test_include_grows_both_axes() {
        let mut bounds = Bounds::from_point(p(0.0, 0.0));
        bounds.include(&p(2.0, -1.0));
        bounds.include(&p(-3.0, 4.0));

        assert_eq!(bounds.min, p(-3.0, -1.0));
        assert_eq!(bounds.max, p(2.0, 4.0));
        assert_eq!(bounds.dx(), 5.0);
        assert_eq!(bounds.dy(), 5.0);
    }

    #[test]
    fn test_single_point_has_zero_spread() {
        let bounds = Bounds::from_point(p(7.0, 7.0));
        assert_eq!(bounds.dx(), 0.0);
        assert_eq!(bounds.dy(), 0.0);
        assert!(bounds.contains(&p(7.0, 7.0)));
    }

    #[test]
    fn test_in_range_is_inclusive() {
        let mut bounds = Bounds::from_point(p(-180.0, -90.0));
        bounds.include(&p(180.0, 90.0));
        assert!(bounds.in_geographic_range());

        bounds.include(&p(180.5, 0.0));
        assert!(!bounds.in_geographic_range());
    }

    #[test]
    fn test_out_of_range_each_side() {
        for point in [p(-200.0, 0.0), p(200.0, 0.0), p(0.0, 100.0), p(0.0, -100.0)] {
            let bounds = Bounds::from_point(point);
            assert!(
                !bounds.in_range(-180.0, 180.0, -90.0, 90.0),
                "expected {:?} to be out of range",
                point
            );
        }
    }
}
