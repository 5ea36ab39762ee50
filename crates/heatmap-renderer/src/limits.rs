//! Point-set limits and projection into pixel space.
//!
//! The vertical axis is north-up: the largest `y` lands on row 0 and the
//! smallest `y` on the last row, which keeps the raster aligned with the
//! north/south edges of a geographic overlay.

use heatmap_common::{Bounds, HeatmapError, HeatmapResult, Point};
use serde::{Deserialize, Serialize};

/// Output canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject canvases with no pixels.
    pub fn validate(&self) -> HeatmapResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HeatmapError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Compute the bounding box of a non-empty point set in a single pass.
pub fn compute_limits(points: &[Point]) -> HeatmapResult<Bounds> {
    let (first, rest) = points.split_first().ok_or(HeatmapError::EmptyInput)?;

    let mut bounds = Bounds::from_point(*first);
    for point in rest {
        bounds.include(point);
    }

    Ok(bounds)
}

/// Maps data coordinates onto the pixel grid of a canvas.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    bounds: Bounds,
    x_scale: f64,
    y_scale: f64,
}

impl Projection {
    pub fn new(size: Size, bounds: Bounds) -> Self {
        Self {
            bounds,
            x_scale: axis_scale(bounds.dx(), size.width),
            y_scale: axis_scale(bounds.dy(), size.height),
        }
    }

    /// Pixel (column, row) of a point. Points outside the bounds project
    /// outside the canvas; callers clip.
    pub fn project(&self, point: &Point) -> (i64, i64) {
        let col = ((point.x - self.bounds.min.x) * self.x_scale).round();
        let row = ((self.bounds.max.y - point.y) * self.y_scale).round();
        (col as i64, row as i64)
    }
}

/// Pixels per coordinate unit. Zero spread collapses the axis onto pixel 0.
fn axis_scale(spread: f64, pixels: u32) -> f64 {
    if spread > 0.0 && spread.is_finite() {
        f64::from(pixels.saturating_sub(1)) / spread
    } else {
        0.0
    }
}
