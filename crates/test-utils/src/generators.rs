//! Point generators for tests and benchmarks.
//!
//! All generators take an explicit seed so results are reproducible.

use heatmap_common::{p, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used by the reference point set.
pub const REFERENCE_SEED: u64 = 4828458249;

/// Number of points in the reference point set.
pub const REFERENCE_POINT_COUNT: usize = 350;

/// `count` points drawn uniformly from `[0, 1) x [0, 1)`.
pub fn uniform_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| p(rng.gen(), rng.gen())).collect()
}

/// The 350 uniform points used throughout the test suite.
pub fn reference_points() -> Vec<Point> {
    uniform_points(REFERENCE_POINT_COUNT, REFERENCE_SEED)
}

/// `count` points drawn uniformly from a lon/lat box.
pub fn geographic_points(
    count: usize,
    seed: u64,
    (west, south, east, north): (f64, f64, f64, f64),
) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| p(rng.gen_range(west..=east), rng.gen_range(south..=north)))
        .collect()
}

/// `count` points scattered around `center` within `spread` on each axis.
pub fn clustered_points(count: usize, seed: u64, center: Point, spread: f64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            p(
                center.x + rng.gen_range(-spread..=spread),
                center.y + rng.gen_range(-spread..=spread),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_points_are_reproducible() {
        assert_eq!(uniform_points(20, 7), uniform_points(20, 7));
        assert_ne!(uniform_points(20, 7), uniform_points(20, 8));
    }

    #[test]
    fn test_uniform_points_in_unit_square() {
        for point in reference_points() {
            assert!((0.0..1.0).contains(&point.x));
            assert!((0.0..1.0).contains(&point.y));
        }
    }

    #[test]
    fn test_geographic_points_stay_in_box() {
        for point in geographic_points(100, 1, (-10.0, 40.0, 5.0, 50.0)) {
            assert!((-10.0..=5.0).contains(&point.x));
            assert!((40.0..=50.0).contains(&point.y));
        }
    }
}
