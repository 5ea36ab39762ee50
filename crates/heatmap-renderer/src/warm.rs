//! Warming: mapping accumulated intensities to colors.
//!
//! Every output pixel depends only on the accumulator value at the same
//! coordinates, so the image is cut into disjoint row bands and each band
//! is colored independently. The accumulator is read-only here and no two
//! bands share an output byte, which keeps the result identical for any
//! number of workers.

use image::RgbaImage;
use rayon::prelude::*;
use tracing::debug;

use crate::placement::Accumulator;
use crate::scheme::Scheme;

/// Color `out` from `acc` through `scheme`, splitting the work into at most
/// `workers` row bands. `workers` of 0 or 1 runs on the calling thread.
///
/// # Panics
/// If `out` and `acc` differ in size.
pub fn warm(out: &mut RgbaImage, acc: &Accumulator, workers: usize, scheme: &Scheme) {
    assert_eq!(
        (out.width(), out.height()),
        (acc.width(), acc.height()),
        "output image and accumulator must have the same dimensions"
    );

    let width = acc.width() as usize;
    let height = acc.height() as usize;
    if width == 0 || height == 0 {
        return;
    }

    let pixels: &mut [u8] = out;
    let intensities = acc.as_slice();
    let bands = workers.clamp(1, height);

    if bands == 1 {
        warm_band(pixels, intensities, scheme);
        return;
    }

    let band_rows = height.div_ceil(bands);
    pixels
        .par_chunks_mut(band_rows * width * 4)
        .zip(intensities.par_chunks(band_rows * width))
        .for_each(|(out_band, acc_band)| warm_band(out_band, acc_band, scheme));

    debug!(bands, band_rows, "Warmed image in parallel");
}

fn warm_band(out: &mut [u8], intensities: &[u8], scheme: &Scheme) {
    for (pixel, &intensity) in out.chunks_exact_mut(4).zip(intensities) {
        pixel.copy_from_slice(&scheme.rgba(intensity));
    }
}
