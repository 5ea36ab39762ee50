//! The radial falloff stamp placed at every point.

use crate::limits::Size;

/// Intensity at the center of a dot. Sixteen coincident points saturate.
pub const DOT_PEAK: u8 = 16;

/// Square intensity kernel of side `2 * ceil(radius) + 1`, smaller when cut
/// to a canvas.
///
/// Values follow a biweight profile, `peak * (1 - (d/r)^2)^2`, which is
/// smooth at the rim so neighbouring stamps blend without visible edges.
/// Everything at or beyond `radius` is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    radius: f64,
    half: usize,
    data: Vec<u8>,
}

impl Dot {
    /// Build the kernel for `radius` pixels.
    ///
    /// A non-positive or non-finite radius gives a single-pixel dot holding
    /// the peak, so every point still registers. The buffer grows with the
    /// square of `radius`; use [`Dot::for_canvas`] when the radius is not
    /// known to be small.
    pub fn new(radius: f64) -> Self {
        Self::with_max_half(radius, usize::MAX)
    }

    /// Kernel for `radius`, cut down to what a canvas of `size` can show.
    ///
    /// Points always project onto the canvas, so no pixel lies further than
    /// the longer canvas side from a stamp's center. Values inside the cut
    /// still fall off against the full `radius`.
    pub fn for_canvas(radius: f64, size: Size) -> Self {
        Self::with_max_half(radius, size.width.max(size.height) as usize)
    }

    fn with_max_half(radius: f64, max_half: usize) -> Self {
        if !(radius > 0.0 && radius.is_finite()) {
            return Self {
                radius: 0.0,
                half: 0,
                data: vec![DOT_PEAK],
            };
        }

        let half = (radius.ceil() as usize).min(max_half);
        let side = 2 * half + 1;
        let mut data = vec![0u8; side * side];

        for (row, line) in data.chunks_exact_mut(side).enumerate() {
            let dy = row as f64 - half as f64;
            for (col, value) in line.iter_mut().enumerate() {
                let dx = col as f64 - half as f64;
                *value = falloff((dx * dx + dy * dy).sqrt(), radius);
            }
        }

        Self { radius, half, data }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance from the center pixel to the kernel edge.
    pub fn half(&self) -> usize {
        self.half
    }

    /// Side length in pixels.
    pub fn side(&self) -> usize {
        2 * self.half + 1
    }

    /// Intensity at kernel pixel (x, y), origin at the top-left corner.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.side() + x]
    }

    /// Row-major kernel values.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

fn falloff(distance: f64, radius: f64) -> u8 {
    if distance >= radius {
        return 0;
    }
    let t = distance / radius;
    let weight = (1.0 - t * t).powi(2);
    (f64::from(DOT_PEAK) * weight).round() as u8
}
