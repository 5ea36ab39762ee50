//! The raster rendering entry point.

use std::time::Instant;

use heatmap_common::{Bounds, HeatmapResult, Point};
use image::RgbaImage;
use tracing::{debug, info};

use crate::dot::Dot;
use crate::limits::{compute_limits, Size};
use crate::placement::{place_points, Accumulator};
use crate::scheme::Scheme;
use crate::warm::warm;

/// Render a heatmap of `points` onto a canvas of `size`.
///
/// # Arguments
/// - `radius`: dot radius in pixels
/// - `workers`: maximum number of row bands colored in parallel (0 or 1
///   stays on the calling thread)
/// - `scheme`: intensity-to-color table
///
/// Fails with `EmptyInput` when `points` is empty and `InvalidSize` when
/// the canvas has no pixels.
pub fn render(
    size: Size,
    points: &[Point],
    radius: f64,
    workers: usize,
    scheme: &Scheme,
) -> HeatmapResult<RgbaImage> {
    render_with_bounds(size, points, radius, workers, scheme).map(|(image, _)| image)
}

/// Like [`render`], also returning the bounds the points were projected from.
pub fn render_with_bounds(
    size: Size,
    points: &[Point],
    radius: f64,
    workers: usize,
    scheme: &Scheme,
) -> HeatmapResult<(RgbaImage, Bounds)> {
    let start = Instant::now();

    let bounds = compute_limits(points)?;
    size.validate()?;
    debug!(points = points.len(), %bounds, "Computed limits");

    let mut acc = Accumulator::new(size.width, size.height);
    let dot = Dot::for_canvas(radius, size);
    place_points(&mut acc, &bounds, points, &dot);

    let mut image = RgbaImage::new(size.width, size.height);
    warm(&mut image, &acc, workers, scheme);

    info!(
        points = points.len(),
        width = size.width,
        height = size.height,
        radius,
        workers,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rendered heatmap"
    );

    Ok((image, bounds))
}
