//! Tests for PNG encoding of rendered heatmaps.

use heatmap_renderer::png::{create_png, create_png_auto, encode_image, encode_indexed};
use heatmap_renderer::scheme::{ALPHA_FIRE, FIRE};
use heatmap_renderer::{compute_limits, place_points, warm, Accumulator, Dot};
use image::RgbaImage;
use test_utils::reference_points;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

fn reference_heatmap(width: u32, height: u32) -> (Accumulator, RgbaImage) {
    let points = reference_points();
    let bounds = compute_limits(&points).unwrap();
    let mut acc = Accumulator::new(width, height);
    place_points(&mut acc, &bounds, &points, &Dot::new(25.0));
    let mut image = RgbaImage::new(width, height);
    warm(&mut image, &acc, 4, &ALPHA_FIRE);
    (acc, image)
}

#[test]
fn test_signature() {
    let pixels = [
        255, 0, 0, 255, // red
        0, 255, 0, 255, // green
        0, 255, 0, 255, // green
        255, 0, 0, 255, // red
    ];
    let png = create_png_auto(&pixels, 2, 2).unwrap();
    assert_eq!(&png[0..8], &PNG_SIGNATURE);
}

#[test]
fn test_rgba_round_trip() {
    let pixels: Vec<u8> = (0..300u32)
        .flat_map(|i| [(i % 256) as u8, (i / 2 % 256) as u8, (i / 3 % 256) as u8, 200])
        .collect();
    let png = create_png(&pixels, 300, 1).unwrap();
    assert_eq!(decode(&png).as_raw(), &pixels);

    // Too many colors for a palette, auto falls back to RGBA
    let auto = create_png_auto(&pixels, 300, 1).unwrap();
    assert_eq!(decode(&auto).as_raw(), &pixels);
}

#[test]
fn test_heatmap_round_trip() {
    let (_, image) = reference_heatmap(200, 150);
    let png = encode_image(&image).unwrap();
    let decoded = decode(&png);
    assert_eq!(decoded.dimensions(), (200, 150));
    assert_eq!(decoded, image);
}

#[test]
fn test_indexed_encoding_matches_warmed_image() {
    let (acc, image) = reference_heatmap(120, 90);
    let png = encode_indexed(&acc, &ALPHA_FIRE).unwrap();
    assert_eq!(decode(&png), image);
}

#[test]
fn test_opaque_scheme_has_no_transparency() {
    let acc = Accumulator::new(8, 8);
    let png = encode_indexed(&acc, &FIRE).unwrap();
    let decoded = decode(&png);
    assert!(decoded.pixels().all(|px| px.0[3] == 255));
}
