//! Point input: text files and seeded demo sets.

use heatmap_common::{p, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PointsError {
    #[error("line {line}: expected two coordinates, found {found:?}")]
    Malformed { line: usize, found: String },

    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: usize, value: String },
}

/// Parse one point per line as `x,y` or `x y`.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_points(text: &str) -> Result<Vec<Point>, PointsError> {
    let mut points = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();

        let [x, y] = fields.as_slice() else {
            return Err(PointsError::Malformed {
                line: index + 1,
                found: line.to_string(),
            });
        };

        points.push(p(coordinate(x, index + 1)?, coordinate(y, index + 1)?));
    }

    Ok(points)
}

fn coordinate(field: &str, line: usize) -> Result<f64, PointsError> {
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PointsError::InvalidNumber {
            line,
            value: field.to_string(),
        }),
    }
}

/// `count` points uniform in the unit square, reproducible for a given seed.
pub fn random_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| p(rng.gen(), rng.gen())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let text = "# lon,lat\n1.5,2\n\n  -3 4.25  \n5.0, 6.0\n";
        let points = parse_points(text).unwrap();
        assert_eq!(points, vec![p(1.5, 2.0), p(-3.0, 4.25), p(5.0, 6.0)]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_points("").unwrap().is_empty());
        assert!(parse_points("# nothing\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let err = parse_points("1,2\n3,4,5\n").unwrap_err();
        assert_eq!(
            err,
            PointsError::Malformed {
                line: 2,
                found: "3,4,5".to_string()
            }
        );
    }

    #[test]
    fn test_parse_bad_number() {
        let err = parse_points("1,abc").unwrap_err();
        assert!(matches!(err, PointsError::InvalidNumber { line: 1, .. }));

        let err = parse_points("NaN 1").unwrap_err();
        assert!(matches!(err, PointsError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn test_random_points() {
        let points = random_points(100, 42);
        assert_eq!(points.len(), 100);
        assert_eq!(points, random_points(100, 42));
        assert!(points
            .iter()
            .all(|pt| (0.0..1.0).contains(&pt.x) && (0.0..1.0).contains(&pt.y)));
    }
}
