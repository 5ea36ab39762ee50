//! Stamping dots into the intensity accumulator.

use heatmap_common::{Bounds, Point};
use tracing::debug;

use crate::dot::Dot;
use crate::limits::{Projection, Size};

/// Single-channel intensity buffer matching the output canvas.
///
/// Additions saturate at `u8::MAX`. Because every contribution is
/// non-negative, the final value of a pixel is `min(sum, 255)` whatever
/// order the stamps arrive in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Accumulator {
    /// Zeroed buffer of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[self.index(x, y)]
    }

    /// Add `value` at (x, y), clamping at the maximum intensity.
    pub fn saturating_add(&mut self, x: u32, y: u32, value: u8) {
        let idx = self.index(x, y);
        self.data[idx] = self.data[idx].saturating_add(value);
    }

    /// Hottest value in the buffer.
    pub fn max_value(&self) -> u8 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Row-major intensities.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Stamp `dot` at the projected location of every point.
///
/// Stamps hanging over the canvas edge are clipped; their visible part still
/// counts.
pub fn place_points(acc: &mut Accumulator, bounds: &Bounds, points: &[Point], dot: &Dot) {
    let projection = Projection::new(acc.size(), *bounds);
    for point in points {
        let (col, row) = projection.project(point);
        stamp(acc, dot, col, row);
    }
    debug!(
        points = points.len(),
        radius = dot.radius(),
        peak = acc.max_value(),
        "Placed points"
    );
}

/// Add the kernel centered on (col, row), clipped to the accumulator.
fn stamp(acc: &mut Accumulator, dot: &Dot, col: i64, row: i64) {
    let half = dot.half() as i64;
    let width = i64::from(acc.width);
    let height = i64::from(acc.height);

    let x0 = (col - half).max(0);
    let x1 = (col + half).min(width - 1);
    let y0 = (row - half).max(0);
    let y1 = (row + half).min(height - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    let side = dot.side();
    let kernel = dot.as_slice();
    let stride = acc.width as usize;

    for y in y0..=y1 {
        let ky = (y - row + half) as usize;
        let kx0 = (x0 - col + half) as usize;
        let kernel_row = &kernel[ky * side + kx0..ky * side + kx0 + (x1 - x0 + 1) as usize];
        let start = y as usize * stride + x0 as usize;
        let dest = &mut acc.data[start..start + kernel_row.len()];
        for (cell, &value) in dest.iter_mut().zip(kernel_row) {
            *cell = cell.saturating_add(value);
        }
    }
}
