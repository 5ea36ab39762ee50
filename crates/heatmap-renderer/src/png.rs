//! PNG encoding for rendered heatmaps.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: a warmed heatmap never holds more than
//!   256 distinct colors, so this is the normal path. [`encode_indexed`]
//!   skips warming entirely and writes the accumulator as palette indices.
//! - **RGBA PNG (color type 6)**: fallback for images with >256 colors.

use std::collections::HashMap;
use std::io::Write;

use heatmap_common::{HeatmapError, HeatmapResult};
use image::RgbaImage;
use rayon::prelude::*;
use tracing::debug;

use crate::placement::Accumulator;
use crate::scheme::{Color, Scheme};

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode a rendered image, choosing indexed output when the colors fit.
pub fn encode_image(image: &RgbaImage) -> HeatmapResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    create_png_auto(image.as_raw(), width as usize, height as usize)
}

/// Encode an accumulator directly as an indexed PNG using `scheme` as the
/// palette. Produces the same pixels as warming followed by [`encode_image`].
pub fn encode_indexed(acc: &Accumulator, scheme: &Scheme) -> HeatmapResult<Vec<u8>> {
    create_png_indexed(
        acc.width() as usize,
        acc.height() as usize,
        scheme.colors(),
        acc.as_slice(),
    )
}

/// Create a PNG image with automatic format selection.
///
/// - If ≤256 unique colors: uses indexed PNG (smaller, faster)
/// - Otherwise: uses RGBA PNG (full color)
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> HeatmapResult<Vec<u8>> {
    check_len(pixels.len(), width * height * 4)?;

    let num_pixels = pixels.len() / 4;
    let palette_result = if num_pixels >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette_result {
        Some((palette, indices)) => {
            debug!(colors = palette.len(), width, height, "Encoding indexed PNG");
            create_png_indexed(width, height, &palette, &indices)
        }
        None => {
            debug!(width, height, "Too many colors, encoding RGBA PNG");
            create_png(pixels, width, height)
        }
    }
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(pixel: &[u8]) -> u32 {
    u32::from_le_bytes([pixel[0], pixel[1], pixel[2], pixel[3]])
}

/// Sequential palette extraction for small images.
fn extract_palette_sequential(pixels: &[u8]) -> Option<(Vec<Color>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<Color> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk);
        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push(Color::new(chunk[0], chunk[1], chunk[2], chunk[3]));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Parallel palette extraction for larger images.
///
/// Unique colors are gathered per chunk, merged, and then every pixel is
/// mapped to its palette index in a second parallel pass.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Vec<Color>, Vec<u8>)> {
    let chunk_pixels = (pixels.len() / 4 / rayon::current_num_threads()).max(256);

    let unique_colors: Vec<u32> = pixels
        .par_chunks(chunk_pixels * 4)
        .flat_map(|chunk| {
            let mut local: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            for pixel in chunk.chunks_exact(4) {
                local.insert(pack_color(pixel), ());
                // Early exit if we definitely have too many colors
                if local.len() > MAX_PALETTE_SIZE {
                    break;
                }
            }
            local.into_keys().collect::<Vec<_>>()
        })
        .collect();

    let mut global: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<Color> = Vec::with_capacity(MAX_PALETTE_SIZE);
    for packed in unique_colors {
        if global.contains_key(&packed) {
            continue;
        }
        if palette.len() >= MAX_PALETTE_SIZE {
            return None;
        }
        global.insert(packed, palette.len() as u8);
        palette.push(Color::from(packed.to_le_bytes()));
    }

    let mut indices = vec![0u8; pixels.len() / 4];
    indices
        .par_chunks_mut(chunk_pixels)
        .zip(pixels.par_chunks(chunk_pixels * 4))
        .for_each(|(idx_chunk, pixel_chunk)| {
            for (idx, pixel) in idx_chunk.iter_mut().zip(pixel_chunk.chunks_exact(4)) {
                *idx = global.get(&pack_color(pixel)).copied().unwrap_or(0);
            }
        });

    Some((palette, indices))
}

/// Create an indexed PNG (color type 3) from palette and indices.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[Color],
    indices: &[u8],
) -> HeatmapResult<Vec<u8>> {
    check_len(indices.len(), width * height)?;
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(HeatmapError::Encode(format!(
            "palette must hold 1..=256 colors, got {}",
            palette.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3)?);

    let plte_data: Vec<u8> = palette.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
    write_chunk(&mut png, b"PLTE", &plte_data);

    // tRNS only if any color has alpha < 255
    if palette.iter().any(|c| c.a < 255) {
        let trns_data: Vec<u8> = palette.iter().map(|c| c.a).collect();
        write_chunk(&mut png, b"tRNS", &trns_data);
    }

    write_chunk(&mut png, b"IDAT", &deflate_scanlines(indices, width, height)?);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create a PNG image from RGBA pixel data (color type 6).
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> HeatmapResult<Vec<u8>> {
    check_len(pixels.len(), width * height * 4)?;

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6)?);
    write_chunk(&mut png, b"IDAT", &deflate_scanlines(pixels, width * 4, height)?);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn check_len(actual: usize, expected: usize) -> HeatmapResult<()> {
    if actual != expected {
        return Err(HeatmapError::Encode(format!(
            "pixel buffer holds {} bytes, expected {}",
            actual, expected
        )));
    }
    Ok(())
}

fn ihdr(width: usize, height: usize, color_type: u8) -> HeatmapResult<Vec<u8>> {
    let dim = |v: usize| {
        u32::try_from(v)
            .ok()
            .filter(|&v| v > 0)
            .ok_or_else(|| HeatmapError::Encode(format!("invalid PNG dimension {}", v)))
    };

    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&dim(width)?.to_be_bytes());
    data.extend_from_slice(&dim(height)?.to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    Ok(data)
}

/// Write a PNG chunk: length, type, data, CRC over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each `row_bytes`-long scanline with filter type 0 and deflate.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> HeatmapResult<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes).take(height) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let compression_failed =
        |e: std::io::Error| HeatmapError::Encode(format!("IDAT compression failed: {}", e));

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed).map_err(compression_failed)?;
    encoder.finish().map_err(compression_failed)
}
