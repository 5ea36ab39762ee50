//! End-to-end tests for the rendering pipeline.

use heatmap_renderer::dot::DOT_PEAK;
use heatmap_renderer::scheme::{ALPHA_FIRE, FIRE};
use heatmap_renderer::{
    compute_limits, p, place_points, render, render_with_bounds, Accumulator, Dot, HeatmapError,
    Size,
};
use test_utils::{reference_points, uniform_points};

#[test]
fn test_reference_render() {
    let points = reference_points();
    let size = Size::new(1024, 1024);
    let image = render(size, &points, 150.0, 8, &FIRE).unwrap();

    assert_eq!(image.dimensions(), (1024, 1024));
    // Fire is opaque everywhere, background included
    assert!(image.pixels().all(|px| px.0[3] == 255));

    // Density is higher in the middle of a uniform cloud than at its corner
    let bounds = compute_limits(&points).unwrap();
    let mut acc = Accumulator::new(1024, 1024);
    place_points(&mut acc, &bounds, &points, &Dot::new(150.0));
    assert!(acc.get(512, 512) > acc.get(0, 0));

    let brightness = |x: u32, y: u32| {
        let px = image.get_pixel(x, y).0;
        px[0] as u32 + px[1] as u32 + px[2] as u32
    };
    assert!(brightness(512, 512) > brightness(0, 0));
}

#[test]
fn test_reference_render_keeps_gradient() {
    let points = reference_points();
    let bounds = compute_limits(&points).unwrap();
    let mut acc = Accumulator::new(1024, 1024);
    place_points(&mut acc, &bounds, &points, &Dot::new(150.0));

    let saturated = acc.as_slice().iter().filter(|&&v| v == u8::MAX).count();
    assert!(
        saturated * 100 < acc.as_slice().len(),
        "{} of {} pixels saturated",
        saturated,
        acc.as_slice().len()
    );

    let mut seen = [false; 256];
    for &v in acc.as_slice() {
        seen[v as usize] = true;
    }
    assert!(seen.iter().filter(|&&s| s).count() > 100);
}

#[test]
fn test_huge_radius_covers_small_canvas() {
    let image = render(Size::new(4, 4), &[p(0.0, 0.0), p(1.0, 1.0)], 1.0e5, 1, &FIRE).unwrap();

    // Both stamps reach every pixel at full strength
    let expected = FIRE.rgba(2 * DOT_PEAK);
    assert!(image.pixels().all(|px| px.0 == expected));
}

#[test]
fn test_faded_scheme_caps_alpha() {
    let points = reference_points();
    let faded = ALPHA_FIRE.with_opacity(128);
    let image = render(Size::new(256, 256), &points, 40.0, 4, &faded).unwrap();

    assert!(image.pixels().all(|px| px.0[3] <= 128));
    assert!(image.pixels().any(|px| px.0[3] > 0));
}

#[test]
fn test_render_is_repeatable_across_workers() {
    let points = uniform_points(120, 99);
    let size = Size::new(333, 200);

    let reference = render(size, &points, 20.0, 1, &ALPHA_FIRE).unwrap();
    for workers in [0, 2, 8, 16] {
        let image = render(size, &points, 20.0, workers, &ALPHA_FIRE).unwrap();
        assert_eq!(image, reference, "workers = {}", workers);
    }
}

#[test]
fn test_render_with_bounds_reports_limits() {
    let points = [p(-3.0, 2.0), p(4.0, -1.0), p(0.0, 0.0)];
    let (image, bounds) = render_with_bounds(Size::new(10, 10), &points, 2.0, 1, &FIRE).unwrap();
    assert_eq!(image.dimensions(), (10, 10));
    assert_eq!(bounds.min, p(-3.0, -1.0));
    assert_eq!(bounds.max, p(4.0, 2.0));
}

#[test]
fn test_single_point_render() {
    let image = render(Size::new(5, 5), &[p(10.0, 10.0)], 0.0, 1, &FIRE).unwrap();
    // Collapsed onto the top-left pixel, everything else is background
    assert_ne!(image.get_pixel(0, 0).0, FIRE.rgba(0));
    assert_eq!(image.get_pixel(4, 4).0, FIRE.rgba(0));
}

#[test]
fn test_empty_points() {
    let result = render(Size::new(10, 10), &[], 5.0, 2, &FIRE);
    assert!(matches!(result, Err(HeatmapError::EmptyInput)));
}

#[test]
fn test_concurrent_renders_are_independent() {
    let points = uniform_points(80, 5);
    let expected = render(Size::new(64, 64), &points, 10.0, 2, &FIRE).unwrap();

    let images: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| render(Size::new(64, 64), &points, 10.0, 2, &FIRE).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for image in images {
        assert_eq!(image, expected);
    }
}
